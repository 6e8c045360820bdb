// this_file: crates/uitext-core/src/descriptor.rs

//! What a successful font lookup hands back

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DEFAULT_FAMILY;

/// How hard outlines get pushed onto the pixel grid
///
/// Raw values match fontconfig's `FC_HINT_*` constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintStyle {
    None = 0,
    #[default]
    Slight = 1,
    Medium = 2,
    Full = 3,
}

impl HintStyle {
    /// Interpret a raw integer; anything above the known range is `Full`
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            i32::MIN..=0 => Self::None,
            1 => Self::Slight,
            2 => Self::Medium,
            _ => Self::Full,
        }
    }

    pub const fn raw(self) -> i32 {
        self as i32
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Slight => "slight",
            Self::Medium => "medium",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for HintStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HintStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "hintnone" => Ok(Self::None),
            "slight" | "hintslight" => Ok(Self::Slight),
            "medium" | "hintmedium" => Ok(Self::Medium),
            "full" | "hintfull" => Ok(Self::Full),
            other => other
                .parse::<i32>()
                .map(Self::from_raw)
                .map_err(|_| format!("unknown hint style '{}'", s)),
        }
    }
}

/// Bold and italic, the only style axes UI text asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FaceStyle {
    pub bold: bool,
    pub italic: bool,
}

impl FaceStyle {
    pub const REGULAR: Self = Self::new(false, false);
    pub const BOLD: Self = Self::new(true, false);
    pub const ITALIC: Self = Self::new(false, true);
    pub const BOLD_ITALIC: Self = Self::new(true, true);

    pub const fn new(bold: bool, italic: bool) -> Self {
        Self { bold, italic }
    }

    /// OpenType weight class for this style
    pub const fn weight(self) -> u16 {
        if self.bold {
            700
        } else {
            400
        }
    }
}

impl fmt::Display for FaceStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.bold, self.italic) {
            (false, false) => f.write_str("regular"),
            (true, false) => f.write_str("bold"),
            (false, true) => f.write_str("italic"),
            (true, true) => f.write_str("bold italic"),
        }
    }
}

/// The family and style consulted whenever a lookup names no family
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MainFace {
    pub family: String,
    pub style: FaceStyle,
}

impl MainFace {
    pub fn new(family: impl Into<String>, style: FaceStyle) -> Self {
        Self {
            family: family.into(),
            style,
        }
    }
}

impl Default for MainFace {
    fn default() -> Self {
        Self::new(DEFAULT_FAMILY, FaceStyle::REGULAR)
    }
}

/// A resolved font on disk
///
/// Only produced by a successful lookup, so `path` always names a file the
/// resolver has indexed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontDescriptor {
    /// Absolute path to the font file
    pub path: PathBuf,
    /// Face within a collection (0 for single-face files)
    pub index: u32,
    /// Whether outlines should be hinted
    pub hinting: bool,
    pub hintstyle: HintStyle,
    /// Family name the face was indexed under
    pub family: String,
    /// The face carries COLR, CBDT, sbix or SVG glyphs
    pub is_color: bool,
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}", self.family, self.path.display())?;
        if self.index > 0 {
            write!(f, " #{}", self.index)?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hintstyle_from_raw() {
        assert_eq!(HintStyle::from_raw(-3), HintStyle::None);
        assert_eq!(HintStyle::from_raw(0), HintStyle::None);
        assert_eq!(HintStyle::from_raw(2), HintStyle::Medium);
        assert_eq!(HintStyle::from_raw(42), HintStyle::Full);
        assert_eq!(HintStyle::Full.raw(), 3);
    }

    #[test]
    fn test_hintstyle_parse() {
        assert_eq!("Slight".parse::<HintStyle>(), Ok(HintStyle::Slight));
        assert_eq!("hintfull".parse::<HintStyle>(), Ok(HintStyle::Full));
        assert_eq!("0".parse::<HintStyle>(), Ok(HintStyle::None));
        assert!("sharp".parse::<HintStyle>().is_err());
    }

    #[test]
    fn test_face_style() {
        assert_eq!(FaceStyle::BOLD.weight(), 700);
        assert_eq!(FaceStyle::ITALIC.weight(), 400);
        assert_eq!(FaceStyle::BOLD_ITALIC.to_string(), "bold italic");
    }

    #[test]
    fn test_descriptor_serde() {
        let descriptor = FontDescriptor {
            path: PathBuf::from("/usr/share/fonts/DejaVuSansMono.ttf"),
            index: 0,
            hinting: true,
            hintstyle: HintStyle::Slight,
            family: "DejaVu Sans Mono".to_string(),
            is_color: false,
        };
        let json = serde_json::to_string(&descriptor).unwrap();
        assert!(json.contains("\"hintstyle\":\"slight\""));
        let back: FontDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, descriptor);
    }
}
