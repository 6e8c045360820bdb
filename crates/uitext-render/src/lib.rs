// this_file: crates/uitext-render/src/lib.rs

//! Single-line text rendering into caller-owned pixels
//!
//! [`LineRenderer::render_single_line`] is the whole job: fill the canvas
//! with the background, lay the text out along one baseline using the
//! resolver's main face (plus fallbacks), and blend every glyph's coverage
//! toward the foreground color.
//!
//! The line box (ascent plus descent of the main face) sits centered in the
//! canvas; `y_offset` nudges it from there and `x_offset` is where the pen
//! starts. Lines too wide for the canvas end in an ellipsis.

mod canvas;
mod layout;

use std::sync::Arc;

use uitext_core::{
    error::{EngineErrorCode, RenderError},
    Color, FontResolver, Result,
};
use uitext_engine::{GlyphEngine, GlyphRasterizer, HintSettings, MAX_PIXEL_SIZE};

pub use canvas::Canvas;
pub use layout::{FaceSlot, LineLayout, PlacedGlyph};

use layout::LineBuilder;

/// How to draw one line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineParams {
    /// Font size in pixels per em
    pub size_px: u32,
    pub fg: Color,
    pub bg: Color,
    /// Where the pen starts, in pixels from the left edge
    pub x_offset: f32,
    /// Shift of the centered baseline, positive moves down
    pub y_offset: f32,
}

impl Default for LineParams {
    fn default() -> Self {
        Self {
            size_px: 14,
            fg: Color::white(),
            bg: Color::black(),
            x_offset: 0.0,
            y_offset: 0.0,
        }
    }
}

impl LineParams {
    pub fn new(size_px: u32, fg: Color, bg: Color) -> Self {
        Self {
            size_px,
            fg,
            bg,
            ..Self::default()
        }
    }

    pub fn with_offsets(mut self, x_offset: f32, y_offset: f32) -> Self {
        self.x_offset = x_offset;
        self.y_offset = y_offset;
        self
    }
}

/// Draws lines with faces from a resolver and glyphs from an engine
#[derive(Clone)]
pub struct LineRenderer {
    resolver: Arc<dyn FontResolver>,
    engine: Arc<GlyphEngine>,
}

impl std::fmt::Debug for LineRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineRenderer")
            .field("resolver", &self.resolver.name())
            .field("engine", &self.engine)
            .finish()
    }
}

impl LineRenderer {
    pub fn new(resolver: Arc<dyn FontResolver>, engine: Arc<GlyphEngine>) -> Self {
        Self { resolver, engine }
    }

    pub fn resolver(&self) -> &Arc<dyn FontResolver> {
        &self.resolver
    }

    pub fn engine(&self) -> &Arc<GlyphEngine> {
        &self.engine
    }

    /// Resolve and load the main face
    fn main_face(&self) -> Result<FaceSlot> {
        let main = self.resolver.main_face();
        let descriptor = self
            .resolver
            .information_for_font_family(Some(&main.family), main.style)?;
        let face = self
            .engine
            .native_face_from_path(&descriptor.path, descriptor.index)?;
        Ok(FaceSlot {
            face,
            hint: HintSettings::from_descriptor(&descriptor),
        })
    }

    /// Sizes outside `1..=MAX_PIXEL_SIZE` are refused before any font work
    fn check_size(&self, size_px: u32) -> Result<()> {
        if size_px == 0 || size_px > MAX_PIXEL_SIZE {
            self.engine
                .set_error("Failed to set pixel size", EngineErrorCode::InvalidPixelSize.raw());
            return Err(RenderError::InvalidSize(size_px).into());
        }
        Ok(())
    }

    /// Place `text` at `size_px`, fitting it into `available` pixels if given
    pub fn layout(&self, text: &str, size_px: u32, available: Option<f32>) -> Result<LineLayout> {
        self.check_size(size_px)?;
        let main = self.main_face()?;
        let style = self.resolver.main_face().style;
        let builder = LineBuilder::new(
            self.resolver.as_ref(),
            &self.engine,
            main,
            style,
            size_px as f32,
        );
        Ok(builder.build(text, available))
    }

    /// Render `text` as one line into `canvas`
    ///
    /// The canvas is filled with `params.bg` before anything can fail past
    /// argument checks, so on error it holds at least a clean background.
    pub fn render_single_line(
        &self,
        text: &str,
        params: &LineParams,
        canvas: &mut Canvas<'_>,
    ) -> Result<()> {
        self.check_size(params.size_px)?;
        if text.contains(['\n', '\r']) {
            return Err(RenderError::MultiLine.into());
        }

        canvas.fill(params.bg);
        if text.is_empty() {
            return Ok(());
        }

        let size = params.size_px as f32;
        let available = canvas.width() as f32 - params.x_offset;
        let line = self.layout(text, params.size_px, Some(available))?;
        if line.glyphs.is_empty() {
            return Ok(());
        }

        let metrics = line.faces[0].face.line_metrics(size);
        let baseline = ((canvas.height() as f32 - metrics.height()) / 2.0
            + metrics.ascent
            + params.y_offset)
            .round() as i32;

        let rasterizers = line
            .faces
            .iter()
            .map(|slot| slot.face.rasterizer(size, slot.hint))
            .collect::<std::result::Result<Vec<GlyphRasterizer<'_>>, _>>()
            .map_err(|err| {
                self.engine.set_error("Failed to set pixel size", err.code().raw());
                RenderError::Rasterize {
                    glyph: 0,
                    reason: err.to_string(),
                }
            })?;

        log::debug!(
            "Rendering {} glyphs from {} faces at {}px{}",
            line.glyphs.len(),
            line.faces.len(),
            params.size_px,
            if line.truncated { " (truncated)" } else { "" }
        );

        for placed in &line.glyphs {
            let pen = params.x_offset + placed.x;
            let origin = pen.floor();
            let image = match rasterizers[placed.face].render(placed.glyph, pen - origin) {
                Ok(Some(image)) => image,
                Ok(None) => continue,
                Err(err) => {
                    let prefix = format!(
                        "Failed to render glyph {} for U+{:04X}",
                        placed.glyph,
                        u32::from(placed.ch)
                    );
                    self.engine.set_error(&prefix, err.code().raw());
                    return Err(RenderError::Rasterize {
                        glyph: placed.glyph,
                        reason: err.to_string(),
                    }
                    .into());
                },
            };
            canvas.blend_mask(
                origin as i32 + image.left,
                baseline + image.top,
                &image.bitmap,
                params.fg,
            );
        }
        Ok(())
    }
}
