//! The seam between rendering and font lookup
//!
//! The rasterizer never talks to a font database directly. It asks a
//! [`FontResolver`] for descriptors and lets the glyph engine load them,
//! so a test can swap in a resolver over a handful of bundled files.

use crate::{error::Result, FaceStyle, FontDescriptor, MainFace};

/// Maps family names and characters to concrete font files
///
/// Implementations own the main-face state; nothing here is process-global.
pub trait FontResolver: Send + Sync {
    /// Identify yourself in logs
    fn name(&self) -> &'static str;

    /// Resolve a family and style to a face on disk
    ///
    /// `None` means "the main face family". Fails when no installed face
    /// carries the family name.
    fn information_for_font_family(
        &self,
        family: Option<&str>,
        style: FaceStyle,
    ) -> Result<FontDescriptor>;

    /// Find a face that can draw `ch` when the primary family can't
    ///
    /// With `prefer_color`, faces carrying color glyph data rank first.
    fn fallback_font(
        &self,
        ch: char,
        family: Option<&str>,
        style: FaceStyle,
        prefer_color: bool,
    ) -> Result<FontDescriptor>;

    /// Change the family and style used when a lookup names no family
    fn set_main_face_family(&self, family: &str, style: FaceStyle);

    /// The current main face
    fn main_face(&self) -> MainFace;
}
