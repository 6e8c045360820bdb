// this_file: crates/uitext-fontdb/src/generic.rs

//! CSS-style generic family names
//!
//! fontdb's own generic defaults name Windows fonts, which most Linux boxes
//! don't have. Each generic therefore expands to a list of concrete names:
//! the configured override, whatever fontdb has been told, then a few
//! families that ship almost everywhere.

use uitext_core::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenericFamily {
    Monospace,
    SansSerif,
    Serif,
    Cursive,
    Fantasy,
}

impl GenericFamily {
    /// Recognize a generic name, ignoring case and surrounding space
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "monospace" | "mono" => Some(Self::Monospace),
            "sans-serif" | "sans" => Some(Self::SansSerif),
            "serif" => Some(Self::Serif),
            "cursive" => Some(Self::Cursive),
            "fantasy" => Some(Self::Fantasy),
            _ => None,
        }
    }

    pub fn as_fontdb(self) -> fontdb::Family<'static> {
        match self {
            Self::Monospace => fontdb::Family::Monospace,
            Self::SansSerif => fontdb::Family::SansSerif,
            Self::Serif => fontdb::Family::Serif,
            Self::Cursive => fontdb::Family::Cursive,
            Self::Fantasy => fontdb::Family::Fantasy,
        }
    }

    fn well_known(self) -> &'static [&'static str] {
        match self {
            Self::Monospace => &[
                "DejaVu Sans Mono",
                "Liberation Mono",
                "Noto Sans Mono",
                "Menlo",
                "Consolas",
                "Courier New",
            ],
            Self::SansSerif => &[
                "DejaVu Sans",
                "Liberation Sans",
                "Noto Sans",
                "Helvetica",
                "Arial",
            ],
            Self::Serif => &[
                "DejaVu Serif",
                "Liberation Serif",
                "Noto Serif",
                "Times New Roman",
            ],
            Self::Cursive | Self::Fantasy => &[],
        }
    }

    fn configured(self, config: &Config) -> Option<&str> {
        match self {
            Self::Monospace => config.monospace_family.as_deref(),
            Self::SansSerif => config.sans_serif_family.as_deref(),
            Self::Serif => config.serif_family.as_deref(),
            Self::Cursive | Self::Fantasy => None,
        }
    }

    /// Concrete family names to try, most preferred first, without duplicates
    pub fn candidates(self, config: &Config, db: &fontdb::Database) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let mut push = |name: &str| {
            if !name.is_empty() && !names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
                names.push(name.to_string());
            }
        };
        if let Some(name) = self.configured(config) {
            push(name);
        }
        push(db.family_name(&self.as_fontdb()));
        for name in self.well_known() {
            push(name);
        }
        names
    }
}

/// Point fontdb's generic families at the configured overrides
pub(crate) fn apply_overrides(config: &Config, db: &mut fontdb::Database) {
    if let Some(name) = &config.monospace_family {
        db.set_monospace_family(name.as_str());
    }
    if let Some(name) = &config.sans_serif_family {
        db.set_sans_serif_family(name.as_str());
    }
    if let Some(name) = &config.serif_family {
        db.set_serif_family(name.as_str());
    }
}
