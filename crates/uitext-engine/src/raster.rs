// this_file: crates/uitext-engine/src/raster.rs

//! Glyph coverage from outlines or embedded mask strikes
//!
//! Outlines go through skrifa into a pen that feeds two consumers at once:
//! an SVG path string for zeno and a kurbo path for exact bounds. The pen
//! flips y while drawing, so everything after it already lives in screen
//! space and no bitmap flip is needed.
//!
//! Faces without outlines (bitmap-only fonts) fall back to their EBDT/CBDT
//! mask strikes. Color strikes are ignored; the compositor only blends a
//! single foreground color.

use kurbo::Shape;
use skrifa::bitmap::{BitmapData, MaskData, Origin};
use skrifa::instance::{LocationRef, Size};
use skrifa::outline::{
    DrawSettings, Engine, HintingInstance, HintingOptions, OutlineGlyphCollection, SmoothMode,
    Target,
};
use skrifa::{GlyphId, MetadataProvider};
use uitext_core::{error::EngineError, Bitmap, FontDescriptor, HintStyle};
use zeno::Mask;

use crate::convert::{convert_mono_bitmap, repack_bit_aligned};
use crate::face::Face;

/// Largest pixel size a glyph is drawn at
pub const MAX_PIXEL_SIZE: u32 = 2048;

/// Largest coverage mask one glyph may allocate, in bytes
pub const MAX_MASK_AREA: usize = 1 << 26;

/// How outlines get grid-fitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HintSettings {
    pub enabled: bool,
    pub style: HintStyle,
}

impl HintSettings {
    pub const NONE: Self = Self {
        enabled: false,
        style: HintStyle::None,
    };

    pub fn new(enabled: bool, style: HintStyle) -> Self {
        Self { enabled, style }
    }

    pub fn from_descriptor(descriptor: &FontDescriptor) -> Self {
        Self::new(descriptor.hinting, descriptor.hintstyle)
    }

    /// skrifa options for these settings, `None` when drawing unhinted
    ///
    /// Slight hinting snaps vertically only; medium and full also fit
    /// horizontal stems.
    pub fn options(&self) -> Option<HintingOptions> {
        let mode = match (self.enabled, self.style) {
            (false, _) | (true, HintStyle::None) => return None,
            (true, HintStyle::Slight) => SmoothMode::Light,
            (true, HintStyle::Medium) | (true, HintStyle::Full) => SmoothMode::Normal,
        };
        Some(HintingOptions {
            engine: Engine::AutoFallback,
            target: Target::Smooth {
                mode,
                symmetric_rendering: false,
                preserve_linear_metrics: true,
            },
        })
    }
}

/// A rasterized glyph positioned against its pen origin
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphImage {
    /// Top-down 8-bit coverage
    pub bitmap: Bitmap,
    /// Columns from the pen x position to the first bitmap column
    pub left: i32,
    /// Rows from the baseline to the first bitmap row, negative above it
    pub top: i32,
}

/// Draws glyphs of one face at one pixel size
pub struct GlyphRasterizer<'a> {
    face: &'a Face,
    font: skrifa::FontRef<'a>,
    outlines: OutlineGlyphCollection<'a>,
    hinting: Option<HintingInstance>,
    size: f32,
}

impl std::fmt::Debug for GlyphRasterizer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphRasterizer")
            .field("face", &self.face)
            .field("hinted", &self.hinting.is_some())
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl<'a> GlyphRasterizer<'a> {
    pub(crate) fn new(face: &'a Face, size: f32, hint: HintSettings) -> Result<Self, EngineError> {
        if !size.is_finite() || size <= 0.0 || size > MAX_PIXEL_SIZE as f32 {
            return Err(EngineError::InvalidPixelSize(size));
        }
        let font = face.font_ref()?;
        let outlines = font.outline_glyphs();
        let hinting = hint.options().and_then(|options| {
            match HintingInstance::new(&outlines, Size::new(size), LocationRef::default(), options)
            {
                Ok(instance) => Some(instance),
                Err(e) => {
                    log::debug!(
                        "Hinting unavailable for {}: {}, drawing unhinted",
                        face.path().display(),
                        e
                    );
                    None
                },
            }
        });
        Ok(Self {
            face,
            font,
            outlines,
            hinting,
            size,
        })
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn is_hinted(&self) -> bool {
        self.hinting.is_some()
    }

    /// Rasterize `glyph` with its origin shifted right by `x_fract` pixels
    ///
    /// Returns `Ok(None)` for glyphs with no ink (spaces) and for color-only
    /// strikes.
    pub fn render(&self, glyph: u32, x_fract: f32) -> Result<Option<GlyphImage>, EngineError> {
        let gid = GlyphId::new(glyph);
        if let Some(outline) = self.outlines.get(gid) {
            let settings = match &self.hinting {
                Some(instance) => DrawSettings::hinted(instance, false),
                None => DrawSettings::unhinted(Size::new(self.size), LocationRef::default()),
            };
            let mut pen = ScreenPen::new(x_fract);
            outline
                .draw(settings, &mut pen)
                .map_err(|e| EngineError::Outline {
                    glyph,
                    reason: e.to_string(),
                })?;
            return pen.rasterize(glyph);
        }

        let strikes = self.font.bitmap_strikes();
        if let Some(strike) = strikes.glyph_for_size(Size::new(self.size), gid) {
            let bitmap = match &strike.data {
                BitmapData::Mask(mask) => mask_coverage(mask, strike.width, strike.height)?,
                BitmapData::Png(_) | BitmapData::Bgra(_) => {
                    log::trace!("Skipping color strike for glyph {}", glyph);
                    return Ok(None);
                },
            };
            let left = (strike.bearing_x - strike.inner_bearing_x).round() as i32;
            let above = match strike.placement_origin {
                Origin::TopLeft => strike.bearing_y - strike.inner_bearing_y,
                Origin::BottomLeft => {
                    strike.bearing_y - strike.inner_bearing_y + strike.height as f32
                },
            };
            return Ok(Some(GlyphImage {
                bitmap,
                left,
                top: -(above.round() as i32),
            }));
        }

        Err(EngineError::GlyphNotFound(glyph))
    }

    pub fn face(&self) -> &Face {
        self.face
    }
}

/// Expand embedded mask data of any depth into 8-bit coverage
fn mask_coverage(mask: &MaskData<'_>, width: u32, rows: u32) -> Result<Bitmap, EngineError> {
    let invalid = || {
        EngineError::InvalidBitmap(format!(
            "{}bpp mask for {}x{} glyph holds {} bytes",
            mask.bpp,
            width,
            rows,
            mask.data.len()
        ))
    };
    match mask.bpp {
        1 => {
            let mono = if mask.is_packed {
                repack_bit_aligned(mask.data, width, rows).ok_or_else(invalid)?
            } else {
                Bitmap::mono(width, rows, mask.data.to_vec())
            };
            convert_mono_bitmap(&mono)
        },
        2 | 4 | 8 => {
            let bpp = mask.bpp as usize;
            let width_px = width as usize;
            let row_bits = width_px * bpp;
            let row_bytes = row_bits.div_ceil(8);
            let max_level = (1u16 << bpp) - 1;
            let mut levels = vec![0u8; width_px * rows as usize];
            for y in 0..rows as usize {
                for x in 0..width_px {
                    let bit = if mask.is_packed {
                        (y * width_px + x) * bpp
                    } else {
                        y * row_bytes * 8 + x * bpp
                    };
                    let byte = *mask.data.get(bit / 8).ok_or_else(invalid)?;
                    let shift = 8 - bpp - (bit % 8);
                    levels[y * width_px + x] = (byte >> shift) & max_level as u8;
                }
            }
            let mut gray = Bitmap::gray(width, rows, levels);
            gray.num_grays = max_level + 1;
            convert_mono_bitmap(&gray)
        },
        _ => Err(invalid()),
    }
}

/// Outline pen producing y-down paths for zeno and kurbo
struct ScreenPen {
    commands: Vec<String>,
    path: kurbo::BezPath,
    dx: f32,
}

impl ScreenPen {
    fn new(dx: f32) -> Self {
        Self {
            commands: Vec::new(),
            path: kurbo::BezPath::new(),
            dx,
        }
    }

    fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (x + self.dx, -y)
    }

    /// Fill the collected path into a coverage mask
    fn rasterize(self, glyph: u32) -> Result<Option<GlyphImage>, EngineError> {
        if self.commands.is_empty() {
            return Ok(None);
        }
        let bbox = self.path.bounding_box();
        if !(bbox.x0.is_finite() && bbox.y0.is_finite() && bbox.x1.is_finite() && bbox.y1.is_finite())
        {
            return Ok(None);
        }
        let left = bbox.x0.floor() as i32;
        let top = bbox.y0.floor() as i32;
        let width = (bbox.x1.ceil() as i64 - left as i64).clamp(0, u32::MAX as i64) as u32;
        let height = (bbox.y1.ceil() as i64 - top as i64).clamp(0, u32::MAX as i64) as u32;
        if width == 0 || height == 0 {
            return Ok(None);
        }

        let area = (width as usize)
            .checked_mul(height as usize)
            .filter(|area| *area <= MAX_MASK_AREA)
            .ok_or_else(|| {
                EngineError::InvalidBitmap(format!(
                    "glyph {glyph} mask {width}x{height} exceeds {MAX_MASK_AREA} bytes"
                ))
            })?;

        let data = self.commands.join(" ");
        let mut mask = vec![0u8; area];
        let _placement = Mask::new(data.as_str())
            .size(width, height)
            .offset((-left, -top))
            .render_into(&mut mask, None);

        Ok(Some(GlyphImage {
            bitmap: Bitmap::gray(width, height, mask),
            left,
            top,
        }))
    }
}

impl skrifa::outline::OutlinePen for ScreenPen {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.commands.push(format!("M {:.3},{:.3}", x, y));
        self.path.move_to((x as f64, y as f64));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.commands.push(format!("L {:.3},{:.3}", x, y));
        self.path.line_to((x as f64, y as f64));
    }

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        let (cx, cy) = self.point(cx, cy);
        let (x, y) = self.point(x, y);
        self.commands
            .push(format!("Q {:.3},{:.3} {:.3},{:.3}", cx, cy, x, y));
        self.path.quad_to((cx as f64, cy as f64), (x as f64, y as f64));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let (cx0, cy0) = self.point(cx0, cy0);
        let (cx1, cy1) = self.point(cx1, cy1);
        let (x, y) = self.point(x, y);
        self.commands.push(format!(
            "C {:.3},{:.3} {:.3},{:.3} {:.3},{:.3}",
            cx0, cy0, cx1, cy1, x, y
        ));
        self.path.curve_to(
            (cx0 as f64, cy0 as f64),
            (cx1 as f64, cy1 as f64),
            (x as f64, y as f64),
        );
    }

    fn close(&mut self) {
        self.commands.push("Z".to_string());
        self.path.close_path();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skrifa::outline::OutlinePen;

    #[test]
    fn test_hint_options_follow_style() {
        assert!(HintSettings::NONE.options().is_none());
        assert!(HintSettings::new(true, HintStyle::None).options().is_none());
        assert!(HintSettings::new(false, HintStyle::Full).options().is_none());

        let slight = HintSettings::new(true, HintStyle::Slight).options();
        assert!(matches!(
            slight.map(|o| o.target),
            Some(Target::Smooth {
                mode: SmoothMode::Light,
                ..
            })
        ));
        let full = HintSettings::new(true, HintStyle::Full).options();
        assert!(matches!(
            full.map(|o| o.target),
            Some(Target::Smooth {
                mode: SmoothMode::Normal,
                ..
            })
        ));
    }

    #[test]
    fn test_pen_square_fills_interior() {
        // 10x10 square sitting on the baseline, font units == pixels
        let mut pen = ScreenPen::new(0.0);
        pen.move_to(0.0, 0.0);
        pen.line_to(10.0, 0.0);
        pen.line_to(10.0, 10.0);
        pen.line_to(0.0, 10.0);
        pen.close();

        let image = pen.rasterize(1).unwrap().unwrap();
        assert_eq!(image.left, 0);
        assert_eq!(image.top, -10);
        assert_eq!(image.bitmap.width, 10);
        assert_eq!(image.bitmap.rows, 10);
        assert_eq!(image.bitmap.coverage(5, 5), 255);
    }

    #[test]
    fn test_pen_fractional_shift_moves_bounds() {
        let mut pen = ScreenPen::new(0.5);
        pen.move_to(0.0, 0.0);
        pen.line_to(4.0, 0.0);
        pen.line_to(4.0, 4.0);
        pen.line_to(0.0, 4.0);
        pen.close();

        let image = pen.rasterize(1).unwrap().unwrap();
        assert_eq!(image.left, 0);
        assert_eq!(image.bitmap.width, 5);
        // Half-covered edge columns
        assert!(image.bitmap.coverage(0, 2) > 0);
        assert!(image.bitmap.coverage(0, 2) < 255);
    }

    #[test]
    fn test_empty_pen_has_no_ink() {
        assert!(ScreenPen::new(0.0).rasterize(0).unwrap().is_none());
    }

    #[test]
    fn test_pen_oversized_outline_is_an_error() {
        // A glyph scaled far beyond any canvas must not allocate its mask
        let mut pen = ScreenPen::new(0.0);
        pen.move_to(0.0, 0.0);
        pen.line_to(3.0e6, 0.0);
        pen.line_to(3.0e6, 3.0e6);
        pen.line_to(0.0, 3.0e6);
        pen.close();

        let err = pen.rasterize(7).unwrap_err();
        assert!(matches!(err, EngineError::InvalidBitmap(_)));
    }

    #[test]
    fn test_mask_coverage_depths() {
        let one = MaskData {
            bpp: 1,
            is_packed: false,
            data: &[0b1000_0000, 0b0100_0000],
        };
        let bitmap = mask_coverage(&one, 2, 2).unwrap();
        assert_eq!(bitmap.buffer, vec![255, 0, 0, 255]);

        let two = MaskData {
            bpp: 2,
            is_packed: true,
            data: &[0b00_01_10_11],
        };
        let bitmap = mask_coverage(&two, 4, 1).unwrap();
        assert_eq!(bitmap.buffer, vec![0, 85, 170, 255]);

        let eight = MaskData {
            bpp: 8,
            is_packed: false,
            data: &[0, 128, 255],
        };
        assert_eq!(mask_coverage(&eight, 3, 1).unwrap().buffer, vec![0, 128, 255]);

        let short = MaskData {
            bpp: 4,
            is_packed: false,
            data: &[0xff],
        };
        assert!(mask_coverage(&short, 4, 1).is_err());
    }
}
