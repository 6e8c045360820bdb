// this_file: crates/uitext-engine/src/convert.rs

//! Monochrome to grayscale expansion
//!
//! Embedded 1-bit strikes (EBDT/CBDT mask data) and anything else that
//! arrives as packed bits get expanded here so the compositor only ever
//! sees one coverage byte per pixel.

use uitext_core::{error::EngineError, Bitmap, PixelMode};

/// Expand a 1-bit bitmap into an 8-bit coverage bitmap
///
/// Set bits become 255 and clear bits 0. The result is top-down with
/// `pitch == width` and `num_grays == 256`. Gray input is normalized to the
/// same layout. Fails when `src.buffer` is shorter than its geometry says.
pub fn convert_mono_bitmap(src: &Bitmap) -> Result<Bitmap, EngineError> {
    if src.stride() < src.min_stride() {
        return Err(EngineError::InvalidBitmap(format!(
            "pitch {} too small for {} pixels per row",
            src.pitch, src.width
        )));
    }
    if src.buffer.len() < src.required_len() {
        return Err(EngineError::InvalidBitmap(format!(
            "buffer holds {} bytes, {}x{} with pitch {} needs {}",
            src.buffer.len(),
            src.width,
            src.rows,
            src.pitch,
            src.required_len()
        )));
    }

    let width = src.width as usize;
    let mut buffer = vec![0u8; width * src.rows as usize];

    for (y, out_row) in buffer.chunks_exact_mut(width.max(1)).enumerate() {
        let Some(row) = src.row(y as u32) else {
            break;
        };
        match src.pixel_mode {
            PixelMode::Mono => {
                for (x, out) in out_row.iter_mut().enumerate() {
                    if row[x / 8] & (0x80 >> (x % 8)) != 0 {
                        *out = 255;
                    }
                }
            },
            PixelMode::Gray => {
                let grays = src.num_grays.max(2) as u32;
                for (x, out) in out_row.iter_mut().enumerate() {
                    let level = (row[x] as u32).min(grays - 1);
                    *out = (level * 255 / (grays - 1)) as u8;
                }
            },
        }
    }

    Ok(Bitmap::gray(src.width, src.rows, buffer))
}

/// Unpack bit-aligned rows (no per-row padding) into byte-aligned mono rows
pub(crate) fn repack_bit_aligned(data: &[u8], width: u32, rows: u32) -> Option<Bitmap> {
    let total_bits = width as usize * rows as usize;
    if data.len() * 8 < total_bits {
        return None;
    }
    let mut bitmap = Bitmap::mono(width, rows, vec![0; width.div_ceil(8) as usize * rows as usize]);
    let stride = bitmap.stride();
    for y in 0..rows as usize {
        for x in 0..width as usize {
            let bit = y * width as usize + x;
            if data[bit / 8] & (0x80 >> (bit % 8)) != 0 {
                bitmap.buffer[y * stride + x / 8] |= 0x80 >> (x % 8);
            }
        }
    }
    Some(bitmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_expands_bits() {
        let src = Bitmap::mono(10, 2, vec![0b1010_0000, 0b0100_0000, 0xff, 0b1100_0000]);
        let dest = convert_mono_bitmap(&src).unwrap();
        assert_eq!(dest.pixel_mode, PixelMode::Gray);
        assert_eq!(dest.num_grays, 256);
        assert_eq!(dest.pitch, 10);
        assert_eq!(&dest.buffer[..10], &[255, 0, 255, 0, 0, 0, 0, 0, 0, 255]);
        assert_eq!(&dest.buffer[10..], &[255; 10]);
    }

    #[test]
    fn test_negative_pitch_flips_to_top_down() {
        let mut src = Bitmap::mono(8, 2, vec![0xff, 0x00]);
        src.pitch = -1;
        let dest = convert_mono_bitmap(&src).unwrap();
        // First stored row is the bottom row
        assert_eq!(&dest.buffer[..8], &[0; 8]);
        assert_eq!(&dest.buffer[8..], &[255; 8]);
        assert_eq!(dest.pitch, 8);
    }

    #[test]
    fn test_padded_pitch() {
        let mut src = Bitmap::mono(3, 2, vec![0b1110_0000, 0xaa, 0xaa, 0b0010_0000, 0xaa, 0xaa]);
        src.pitch = 3;
        let dest = convert_mono_bitmap(&src).unwrap();
        assert_eq!(dest.buffer, vec![255, 255, 255, 0, 0, 255]);
    }

    #[test]
    fn test_gray_levels_normalized() {
        let mut src = Bitmap::gray(3, 1, vec![0, 1, 3]);
        src.num_grays = 4;
        let dest = convert_mono_bitmap(&src).unwrap();
        assert_eq!(dest.buffer, vec![0, 85, 255]);
    }

    #[test]
    fn test_short_buffer_rejected() {
        let src = Bitmap::mono(16, 4, vec![0; 7]);
        assert!(matches!(
            convert_mono_bitmap(&src),
            Err(EngineError::InvalidBitmap(_))
        ));
        let mut narrow = Bitmap::mono(16, 1, vec![0; 2]);
        narrow.pitch = 1;
        assert!(convert_mono_bitmap(&narrow).is_err());
    }

    #[test]
    fn test_empty_bitmap() {
        let dest = convert_mono_bitmap(&Bitmap::mono(0, 0, Vec::new())).unwrap();
        assert!(dest.is_empty());
        assert!(dest.buffer.is_empty());
    }

    #[test]
    fn test_repack_bit_aligned() {
        // 3x3 cross packed without row padding: 010 111 010
        let packed = [0b0101_1101, 0b0000_0000];
        let bitmap = repack_bit_aligned(&packed, 3, 3).unwrap();
        assert_eq!(bitmap.buffer, vec![0b0100_0000, 0b1110_0000, 0b0100_0000]);
        assert!(repack_bit_aligned(&[0], 3, 3).is_none());
    }

    proptest! {
        #[test]
        fn every_output_byte_is_on_or_off(width in 1u32..40, rows in 1u32..8, seed in any::<u64>()) {
            let stride = width.div_ceil(8) as usize;
            let buffer: Vec<u8> = (0..stride * rows as usize)
                .map(|i| (seed.rotate_left(i as u32 % 64) as u8) ^ i as u8)
                .collect();
            let src = Bitmap::mono(width, rows, buffer);
            let dest = convert_mono_bitmap(&src).unwrap();
            prop_assert_eq!(dest.buffer.len(), (width * rows) as usize);
            for y in 0..rows {
                for x in 0..width {
                    let expected = src.coverage(x, y);
                    prop_assert_eq!(dest.buffer[(y * width + x) as usize], expected);
                }
            }
        }
    }
}
