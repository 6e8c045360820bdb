//! Family and fallback lookups

use anyhow::{anyhow, bail, Context, Result};
use uitext::{FontDescriptor, TextContext};

use crate::cli::{FallbackArgs, FamilyArgs};

pub fn family(ctx: &TextContext, args: &FamilyArgs) -> Result<()> {
    let descriptor = ctx
        .information_for_font_family(Some(&args.name), args.style.face_style())
        .with_context(|| format!("No match for family {:?}", args.name))?;
    print_descriptor(&descriptor, args.json)
}

pub fn fallback(ctx: &TextContext, args: &FallbackArgs) -> Result<()> {
    let ch = parse_char(&args.character)?;
    let descriptor = ctx
        .fallback_font(ch, args.family.as_deref(), args.style.face_style(), args.color)
        .with_context(|| format!("No fallback for {:?}", args.character))?;
    print_descriptor(&descriptor, args.json)
}

fn print_descriptor(descriptor: &FontDescriptor, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(descriptor)?);
        return Ok(());
    }
    println!("family:    {}", descriptor.family);
    println!("path:      {}", descriptor.path.display());
    println!("index:     {}", descriptor.index);
    println!("hinting:   {}", descriptor.hinting);
    println!("hintstyle: {}", descriptor.hintstyle);
    println!("color:     {}", descriptor.is_color);
    Ok(())
}

/// A literal character, or a code point written `U+XXXX` or `0xXXXX`
pub fn parse_char(value: &str) -> Result<char> {
    let hex = value
        .strip_prefix("U+")
        .or_else(|| value.strip_prefix("u+"))
        .or_else(|| value.strip_prefix("0x"));
    if let Some(hex) = hex {
        let code = u32::from_str_radix(hex, 16)
            .with_context(|| format!("Invalid code point {value:?}"))?;
        return char::from_u32(code).ok_or_else(|| anyhow!("U+{code:04X} is not a character"));
    }

    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => bail!("Expected one character or U+XXXX, got {value:?}"),
    }
}
