// this_file: crates/uitext-cli/src/png.rs

//! PNG output for rendered canvases

use anyhow::{anyhow, Context, Result};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, RgbaImage};
use uitext::Color;

/// Encode ARGB pixels, row-major with no padding, as an RGBA PNG
pub fn encode_argb(pixels: &[u32], width: u32, height: u32) -> Result<Vec<u8>> {
    let expected = width as usize * height as usize;
    if pixels.len() < expected {
        return Err(anyhow!(
            "Buffer too small: {}x{} needs {} pixels, got {}",
            width,
            height,
            expected,
            pixels.len()
        ));
    }

    let rgba: Vec<u8> = pixels[..expected]
        .iter()
        .flat_map(|&argb| Color::from_argb(argb).to_rgba_bytes())
        .collect();
    let img: RgbaImage = ImageBuffer::from_raw(width, height, rgba)
        .ok_or_else(|| anyhow!("Failed to create image buffer from ARGB data"))?;

    let mut png = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut png, CompressionType::Default, FilterType::Sub);
    encoder
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgba8)
        .context("PNG encoding failed")?;
    Ok(png)
}
