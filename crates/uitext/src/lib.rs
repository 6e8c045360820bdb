// this_file: crates/uitext/src/lib.rs

//! uitext - text for a terminal's own chrome
//!
//! Window titles, tab bars and client-side decorations need a sliver of
//! what a full text stack does: find an installed font by family, find a
//! fallback for characters it lacks, and draw one line into a pixel buffer.
//! This crate wires those pieces together:
//!
//! - [`uitext_fontdb`] indexes installed fonts and answers family and
//!   fallback lookups
//! - [`uitext_engine`] maps font files and turns glyphs into coverage
//! - [`uitext_render`] lays out and composites a single line
//!
//! # Example
//!
//! ```no_run
//! use uitext::prelude::*;
//!
//! let ctx = TextContext::from_env();
//! ctx.set_main_face_family("monospace", FaceStyle::BOLD);
//!
//! let (width, height) = (320, 28);
//! let mut pixels = vec![0u32; width * height];
//! let mut canvas = Canvas::new(&mut pixels, width, height)?;
//! let params = LineParams::new(16, Color::white(), Color::rgba(30, 30, 46, 255));
//! ctx.render_single_line("~/src/uitext: vim", &params, &mut canvas)?;
//! # Ok::<(), uitext::UitextError>(())
//! ```

mod context;

pub use context::TextContext;
pub use uitext_core::{
    error, Bitmap, Color, Config, EngineErrorCode, FaceStyle, FontDescriptor, FontResolver,
    HintStyle, MainFace, PixelMode, Result, UitextError, DEFAULT_FAMILY, ELLIPSIS,
};
pub use uitext_engine::{library, Diagnostic, Face, GlyphEngine, GlyphImage, HintSettings};
pub use uitext_fontdb::{GenericFamily, SystemFontResolver};
pub use uitext_render::{Canvas, LineLayout, LineParams, LineRenderer};

pub use uitext_core as core;
pub use uitext_engine as engine;
pub use uitext_fontdb as fontdb;
pub use uitext_render as render;

/// Common imports for typical usage
pub mod prelude {
    pub use crate::{
        Canvas, Color, Config, FaceStyle, FontDescriptor, FontResolver, LineParams, Result,
        TextContext, UitextError,
    };
}
