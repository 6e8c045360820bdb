//! Render command: one line of text into a PNG

use std::fs;

use anyhow::{bail, Context, Result};
use uitext::{Canvas, LineParams, TextContext, DEFAULT_FAMILY};

use crate::cli::RenderArgs;

pub fn run(ctx: &TextContext, args: &RenderArgs) -> Result<()> {
    let family = args.family.as_deref().unwrap_or(DEFAULT_FAMILY);
    let style = args.style.face_style();
    ctx.set_main_face_family(family, style);

    let Some(len) = args.width.checked_mul(args.height) else {
        bail!("Canvas {}x{} is too large", args.width, args.height);
    };
    let mut pixels = vec![0u32; len];
    let mut canvas = Canvas::new(&mut pixels, args.width, args.height)?;
    let params =
        LineParams::new(args.size, args.fg, args.bg).with_offsets(args.x_offset, args.y_offset);
    ctx.render_single_line(&args.text, &params, &mut canvas)
        .with_context(|| format!("Failed to render {:?}", args.text))?;

    let png = crate::png::encode_argb(&pixels, args.width as u32, args.height as u32)?;
    fs::write(&args.output, png)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    log::info!("Rendered {:?} in {} {} at {}px", args.text, family, style, args.size);
    println!("{} ({}x{})", args.output.display(), args.width, args.height);
    Ok(())
}
