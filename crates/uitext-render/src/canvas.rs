// this_file: crates/uitext-render/src/canvas.rs

//! The caller's pixels

use uitext_core::{error::RenderError, Bitmap, Color};

/// A borrowed `width x height` block of `0xAARRGGBB` pixels, row-major
#[derive(Debug)]
pub struct Canvas<'a> {
    pixels: &'a mut [u32],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    /// Wrap `pixels`, which must hold at least `width * height` entries
    pub fn new(pixels: &'a mut [u32], width: usize, height: usize) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(RenderError::InvalidDimensions { width, height })?;
        if pixels.len() < needed {
            return Err(RenderError::BufferTooSmall {
                needed,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The pixels inside the canvas; anything past `width * height` is not ours
    pub fn pixels(&self) -> &[u32] {
        &self.pixels[..self.width * self.height]
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        (x < self.width && y < self.height).then(|| Color(self.pixels[y * self.width + x]))
    }

    pub fn fill(&mut self, color: Color) {
        let len = self.width * self.height;
        self.pixels[..len].fill(color.argb());
    }

    /// Blend `fg` over the canvas through an 8-bit coverage mask whose
    /// top-left pixel lands at `(x, y)`; parts outside the canvas are clipped
    pub fn blend_mask(&mut self, x: i32, y: i32, mask: &Bitmap, fg: Color) {
        for row in 0..mask.rows {
            let py = i64::from(y) + i64::from(row);
            if py < 0 {
                continue;
            }
            if py >= self.height as i64 {
                break;
            }
            let Some(coverage) = mask.row(row) else {
                break;
            };
            let line = py as usize * self.width;
            for (col, &cov) in coverage.iter().take(mask.width as usize).enumerate() {
                if cov == 0 {
                    continue;
                }
                let px = i64::from(x) + col as i64;
                if px < 0 {
                    continue;
                }
                if px >= self.width as i64 {
                    break;
                }
                let slot = &mut self.pixels[line + px as usize];
                *slot = Color(*slot).blend_toward(fg, cov).argb();
            }
        }
    }
}
