//! Face command: what the engine sees in a font file

use anyhow::{Context, Result};
use serde::Serialize;
use uitext::{library, Face};

use crate::cli::FaceArgs;

/// Size the line metrics are reported at
const REPORT_SIZE: f32 = 16.0;

#[derive(Debug, Serialize)]
struct FaceInfo<'a> {
    path: String,
    index: u32,
    family: Option<&'a str>,
    units_per_em: u16,
    glyphs: u32,
    color: bool,
    ascent_16px: f32,
    descent_16px: f32,
    leading_16px: f32,
}

impl<'a> FaceInfo<'a> {
    fn new(face: &'a Face) -> Self {
        let metrics = face.line_metrics(REPORT_SIZE);
        Self {
            path: face.path().display().to_string(),
            index: face.index(),
            family: face.family_name(),
            units_per_em: face.units_per_em(),
            glyphs: face.glyph_count(),
            color: face.is_color(),
            ascent_16px: metrics.ascent,
            descent_16px: metrics.descent,
            leading_16px: metrics.leading,
        }
    }
}

pub fn run(args: &FaceArgs) -> Result<()> {
    let face = library()
        .native_face_from_path(&args.path, args.index)
        .with_context(|| format!("Failed to load {}", args.path.display()))?;
    let info = FaceInfo::new(&face);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }
    println!("path:         {}", info.path);
    println!("index:        {}", info.index);
    println!("family:       {}", info.family.unwrap_or("(unnamed)"));
    println!("units per em: {}", info.units_per_em);
    println!("glyphs:       {}", info.glyphs);
    println!("color:        {}", info.color);
    println!(
        "at {}px:      ascent {:.2}, descent {:.2}, leading {:.2}",
        REPORT_SIZE, info.ascent_16px, info.descent_16px, info.leading_16px
    );
    Ok(())
}
