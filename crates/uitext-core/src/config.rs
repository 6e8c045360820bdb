// this_file: crates/uitext-core/src/config.rs

//! Shared configuration
//!
//! Defaults work out of the box; environment variables override them:
//!
//! | Variable | Effect |
//! |---|---|
//! | `UITEXT_SYSTEM_FONTS` | `0`/`false` skips the system font scan |
//! | `UITEXT_FONT_DIRS` | extra font directories, path-list separated |
//! | `UITEXT_HINTING` | `0`/`false` disables hinting |
//! | `UITEXT_HINTSTYLE` | `none`, `slight`, `medium`, `full` or `0..3` |
//! | `UITEXT_FACE_CACHE` | loaded faces kept by the glyph engine |
//!
//! Bad values are logged and ignored.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::HintStyle;

pub const ENV_SYSTEM_FONTS: &str = "UITEXT_SYSTEM_FONTS";
pub const ENV_FONT_DIRS: &str = "UITEXT_FONT_DIRS";
pub const ENV_HINTING: &str = "UITEXT_HINTING";
pub const ENV_HINTSTYLE: &str = "UITEXT_HINTSTYLE";
pub const ENV_FACE_CACHE: &str = "UITEXT_FACE_CACHE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scan the platform's font directories
    pub load_system_fonts: bool,
    /// Extra directories scanned after the system ones
    pub font_dirs: Vec<PathBuf>,
    pub hinting: bool,
    pub hintstyle: HintStyle,
    /// Loaded faces kept alive by the glyph engine (minimum 1)
    pub face_cache_size: usize,
    /// Memoized fallback lookups (minimum 1)
    pub fallback_cache_size: usize,
    /// Concrete family behind the `monospace` generic
    pub monospace_family: Option<String>,
    /// Concrete family behind the `sans-serif` generic
    pub sans_serif_family: Option<String>,
    /// Concrete family behind the `serif` generic
    pub serif_family: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
            font_dirs: Vec::new(),
            hinting: true,
            hintstyle: HintStyle::Slight,
            face_cache_size: 32,
            fallback_cache_size: 256,
            monospace_family: None,
            sans_serif_family: None,
            serif_family: None,
        }
    }
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|key| env::var(key).ok());
        config
    }

    /// A configuration that only sees the given directories
    pub fn isolated(font_dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            load_system_fonts: false,
            font_dirs: font_dirs.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Apply overrides from any key/value source
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup(ENV_SYSTEM_FONTS) {
            match parse_bool(&value) {
                Some(enabled) => self.load_system_fonts = enabled,
                None => log::warn!("Ignoring {}={:?}: not a boolean", ENV_SYSTEM_FONTS, value),
            }
        }

        if let Some(value) = lookup(ENV_FONT_DIRS) {
            self.font_dirs
                .extend(env::split_paths(&value).filter(|p| !p.as_os_str().is_empty()));
        }

        if let Some(value) = lookup(ENV_HINTING) {
            match parse_bool(&value) {
                Some(enabled) => self.hinting = enabled,
                None => log::warn!("Ignoring {}={:?}: not a boolean", ENV_HINTING, value),
            }
        }

        if let Some(value) = lookup(ENV_HINTSTYLE) {
            match value.parse::<HintStyle>() {
                Ok(style) => self.hintstyle = style,
                Err(err) => log::warn!("Ignoring {}: {}", ENV_HINTSTYLE, err),
            }
        }

        if let Some(value) = lookup(ENV_FACE_CACHE) {
            match value.trim().parse::<usize>() {
                Ok(size) => self.face_cache_size = size.max(1),
                Err(_) => log::warn!("Ignoring {}={:?}: not a number", ENV_FACE_CACHE, value),
            }
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn apply(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut config = Config::default();
        config.apply_env(|key| vars.get(key).cloned());
        config
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.load_system_fonts);
        assert!(config.hinting);
        assert_eq!(config.hintstyle, HintStyle::Slight);
        assert_eq!(config.face_cache_size, 32);
    }

    #[test]
    fn test_env_overrides() {
        let config = apply(&[
            (ENV_SYSTEM_FONTS, "off"),
            (ENV_HINTING, "0"),
            (ENV_HINTSTYLE, "full"),
            (ENV_FACE_CACHE, "0"),
        ]);
        assert!(!config.load_system_fonts);
        assert!(!config.hinting);
        assert_eq!(config.hintstyle, HintStyle::Full);
        assert_eq!(config.face_cache_size, 1);
    }

    #[test]
    fn test_bad_values_ignored() {
        let config = apply(&[(ENV_HINTING, "maybe"), (ENV_FACE_CACHE, "lots")]);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_font_dirs_split() {
        let joined = env::join_paths(["/a/fonts", "/b/fonts"]).unwrap();
        let config = apply(&[(ENV_FONT_DIRS, joined.to_str().unwrap())]);
        assert_eq!(
            config.font_dirs,
            vec![PathBuf::from("/a/fonts"), PathBuf::from("/b/fonts")]
        );
    }

    #[test]
    fn test_partial_json() {
        let config: Config = serde_json::from_str(r#"{"hintstyle":"none"}"#).unwrap();
        assert_eq!(config.hintstyle, HintStyle::None);
        assert!(config.load_system_fonts);
    }
}
