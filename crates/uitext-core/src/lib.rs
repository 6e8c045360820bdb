// this_file: crates/uitext-core/src/lib.rs

//! Uitext Core: the shared vocabulary for UI text
//!
//! A terminal draws its own chrome - window titles, tab bars, decorations -
//! with the same fonts it uses for the grid. This crate holds what every
//! piece of that subsystem agrees on:
//!
//! 1. **Descriptors** - a resolved font on disk ([`FontDescriptor`])
//! 2. **Styles** - bold/italic requests and the main face ([`FaceStyle`], [`MainFace`])
//! 3. **Pixels** - packed ARGB colors and glyph bitmaps ([`Color`], [`Bitmap`])
//! 4. **Errors** - one taxonomy for resolution, loading, engine and rendering failures
//! 5. **Config** - environment-driven knobs shared by all crates
//!
//! ## The Seam
//!
//! Font lookup is pluggable through [`FontResolver`]. The system resolver
//! lives in `uitext-fontdb`; tests and embedders can bring their own.
//!
//! ```rust
//! use uitext_core::{Color, FaceStyle, HintStyle};
//!
//! let fg = Color::from_argb(0xff_20_20_20);
//! assert_eq!(fg.r(), 0x20);
//! assert!(FaceStyle::BOLD.bold);
//! assert_eq!(HintStyle::from_raw(1), HintStyle::Slight);
//! ```

pub mod bitmap;
pub mod color;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod traits;

pub use bitmap::{Bitmap, PixelMode};
pub use color::Color;
pub use config::Config;
pub use descriptor::{FaceStyle, FontDescriptor, HintStyle, MainFace};
pub use error::{EngineErrorCode, Result, UitextError};
pub use traits::FontResolver;

/// The ellipsis appended to lines that overflow their canvas
pub const ELLIPSIS: char = '\u{2026}';

/// Family used for the main face until someone picks another
pub const DEFAULT_FAMILY: &str = "monospace";
