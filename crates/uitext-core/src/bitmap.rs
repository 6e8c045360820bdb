// this_file: crates/uitext-core/src/bitmap.rs

//! Glyph bitmaps as the engine hands them around

/// How a bitmap stores its pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelMode {
    /// One bit per pixel, most significant bit first
    Mono,
    /// One byte of coverage per pixel
    Gray,
}

/// A rectangular glyph image
///
/// `pitch` is the number of bytes per row. A negative pitch means the
/// first row in `buffer` is the bottom row of the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub rows: u32,
    pub pitch: i32,
    pub pixel_mode: PixelMode,
    pub num_grays: u16,
    pub buffer: Vec<u8>,
}

impl Bitmap {
    /// A 1-bit bitmap with rows padded to whole bytes
    pub fn mono(width: u32, rows: u32, buffer: Vec<u8>) -> Self {
        Self {
            width,
            rows,
            pitch: width.div_ceil(8) as i32,
            pixel_mode: PixelMode::Mono,
            num_grays: 2,
            buffer,
        }
    }

    /// An 8-bit coverage bitmap with tightly packed rows
    pub fn gray(width: u32, rows: u32, buffer: Vec<u8>) -> Self {
        Self {
            width,
            rows,
            pitch: width as i32,
            pixel_mode: PixelMode::Gray,
            num_grays: 256,
            buffer,
        }
    }

    /// Bytes per row, ignoring direction
    pub fn stride(&self) -> usize {
        self.pitch.unsigned_abs() as usize
    }

    /// Smallest byte count `buffer` must hold
    pub fn required_len(&self) -> usize {
        self.stride() * self.rows as usize
    }

    /// Minimum stride for this width and pixel mode
    pub fn min_stride(&self) -> usize {
        match self.pixel_mode {
            PixelMode::Mono => (self.width as usize).div_ceil(8),
            PixelMode::Gray => self.width as usize,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.rows == 0
    }

    /// Row `y` counted from the top, whatever the pitch sign
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.rows {
            return None;
        }
        let stored = if self.pitch < 0 {
            self.rows - 1 - y
        } else {
            y
        };
        let start = stored as usize * self.stride();
        self.buffer.get(start..start + self.stride())
    }

    /// Coverage at (x, y) as 0..=255, top-left origin
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        if x >= self.width {
            return 0;
        }
        let Some(row) = self.row(y) else {
            return 0;
        };
        match self.pixel_mode {
            PixelMode::Gray => row.get(x as usize).copied().unwrap_or(0),
            PixelMode::Mono => {
                let byte = row.get(x as usize / 8).copied().unwrap_or(0);
                if byte & (0x80 >> (x % 8)) != 0 {
                    255
                } else {
                    0
                }
            },
        }
    }
}
