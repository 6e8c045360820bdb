// this_file: crates/uitext-core/src/color.rs

//! Packed ARGB colors and coverage blending

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A color packed as `0xAARRGGBB`
///
/// Foreground, background and every output pixel share this layout, so a
/// rendered buffer can be handed straight to an ARGB32 surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn black() -> Self {
        Self::rgba(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::rgba(255, 255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self(0)
    }

    pub const fn argb(self) -> u32 {
        self.0
    }

    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// Move this color toward `src` by `coverage / 255`
    ///
    /// Zero coverage returns `self` untouched and full coverage returns
    /// `src`; everything in between stays within the two per channel.
    pub fn blend_toward(self, src: Color, coverage: u8) -> Color {
        match coverage {
            0 => self,
            255 => src,
            _ => {
                let cov = coverage as u32;
                let inv = 255 - cov;
                let mix = |s: u8, d: u8| ((s as u32 * cov + d as u32 * inv + 127) / 255) as u8;
                Color::rgba(
                    mix(src.r(), self.r()),
                    mix(src.g(), self.g()),
                    mix(src.b(), self.b()),
                    mix(src.a(), self.a()),
                )
            },
        }
    }

    /// Straight (non-premultiplied) RGBA bytes, the order PNG wants
    pub const fn to_rgba_bytes(self) -> [u8; 4] {
        [self.r(), self.g(), self.b(), self.a()]
    }
}

impl From<u32> for Color {
    fn from(argb: u32) -> Self {
        Self(argb)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}

/// Failure to parse a color string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{0}': expected #RRGGBB or #AARRGGBB")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    /// Accepts `#RRGGBB`, `#AARRGGBB`, optionally with `0x` instead of `#`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .or_else(|| s.trim().strip_prefix("0x"))
            .unwrap_or(s.trim());
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError(s.to_string()));
        }
        let value =
            u32::from_str_radix(hex, 16).map_err(|_| ParseColorError(s.to_string()))?;
        match hex.len() {
            6 => Ok(Color(0xff00_0000 | value)),
            8 => Ok(Color(value)),
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_channels() {
        let c = Color::from_argb(0x80_11_22_33);
        assert_eq!((c.a(), c.r(), c.g(), c.b()), (0x80, 0x11, 0x22, 0x33));
        assert_eq!(Color::rgba(0x11, 0x22, 0x33, 0x80), c);
        assert_eq!(c.to_rgba_bytes(), [0x11, 0x22, 0x33, 0x80]);
    }

    #[test]
    fn test_parse() {
        assert_eq!("#ffffff".parse::<Color>(), Ok(Color::white()));
        assert_eq!("0x80000000".parse::<Color>(), Ok(Color(0x8000_0000)));
        assert_eq!("112233".parse::<Color>(), Ok(Color(0xff11_2233)));
        assert!("#fff".parse::<Color>().is_err());
        assert!("#gggggg".parse::<Color>().is_err());
        assert!("+11223".parse::<Color>().is_err());
    }

    #[test]
    fn test_blend_endpoints() {
        let bg = Color::from_argb(0xff_10_20_30);
        let fg = Color::from_argb(0xff_f0_e0_d0);
        assert_eq!(bg.blend_toward(fg, 0), bg);
        assert_eq!(bg.blend_toward(fg, 255), fg);
        let mid = bg.blend_toward(fg, 128);
        assert!(mid.r() > bg.r() && mid.r() < fg.r());
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::black().to_string(), "#ff000000");
    }

    proptest! {
        #[test]
        fn blend_stays_between_endpoints(dst in any::<u32>(), src in any::<u32>(), cov in any::<u8>()) {
            let d = Color(dst);
            let s = Color(src);
            let out = d.blend_toward(s, cov);
            for (o, a, b) in [
                (out.a(), d.a(), s.a()),
                (out.r(), d.r(), s.r()),
                (out.g(), d.g(), s.g()),
                (out.b(), d.b(), s.b()),
            ] {
                prop_assert!(o >= a.min(b) && o <= a.max(b));
            }
        }
    }
}
