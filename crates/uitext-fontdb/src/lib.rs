// this_file: crates/uitext-fontdb/src/lib.rs

//! Where UI text finds its fonts
//!
//! [`SystemFontResolver`] indexes installed fonts with `fontdb` and answers
//! two questions for the rasterizer: which file holds a family in a given
//! style, and which file can draw a character the main face lacks.
//!
//! ## Matching
//!
//! Family names compare case-insensitively against every name a face
//! advertises. Generic names (`monospace`, `sans-serif`, `serif`, `cursive`,
//! `fantasy`) expand to concrete candidates first; see [`GenericFamily`].
//!
//! ## Fallback ranking
//!
//! Among faces whose character map covers the character:
//!
//! 1. color faces first when color is preferred, last otherwise
//! 2. faces of the requested family
//! 3. smallest style distance (italic mismatch outweighs weight)
//! 4. database order
//!
//! Answers are memoized, including "nothing covers this".

mod coverage;
mod generic;

use std::collections::{BTreeSet, HashMap};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use lru::LruCache;
use parking_lot::{Mutex, RwLock};
use uitext_core::{
    error::{ResolveError, Result},
    Config, FaceStyle, FontDescriptor, FontResolver, HintStyle, MainFace,
};

pub use generic::GenericFamily;

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct FallbackKey {
    ch: char,
    family: String,
    style: FaceStyle,
    prefer_color: bool,
}

/// Font lookup over the fonts installed on this machine
pub struct SystemFontResolver {
    db: fontdb::Database,
    config: Config,
    main_face: RwLock<MainFace>,
    fallbacks: Mutex<LruCache<FallbackKey, Option<FontDescriptor>>>,
    color: Mutex<HashMap<fontdb::ID, bool>>,
}

impl std::fmt::Debug for SystemFontResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemFontResolver")
            .field("faces", &self.db.len())
            .field("main_face", &*self.main_face.read())
            .finish()
    }
}

impl SystemFontResolver {
    /// Index system fonts (unless disabled) plus every configured directory
    pub fn new(config: &Config) -> Self {
        let mut db = fontdb::Database::new();
        if config.load_system_fonts {
            db.load_system_fonts();
            log::debug!("Loaded {} system font faces", db.len());
        }
        for dir in &config.font_dirs {
            let expanded = expand_dir(dir);
            if expanded.is_dir() {
                let before = db.len();
                db.load_fonts_dir(&expanded);
                log::debug!(
                    "Loaded {} font faces from {}",
                    db.len() - before,
                    expanded.display()
                );
            } else {
                log::warn!("Ignoring font directory {}: not a directory", expanded.display());
            }
        }
        Self::from_database(db, config)
    }

    /// Wrap a database someone else filled
    pub fn from_database(mut db: fontdb::Database, config: &Config) -> Self {
        generic::apply_overrides(config, &mut db);
        let capacity = NonZeroUsize::new(config.fallback_cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            db,
            config: config.clone(),
            main_face: RwLock::new(MainFace::default()),
            fallbacks: Mutex::new(LruCache::new(capacity)),
            color: Mutex::new(HashMap::new()),
        }
    }

    pub fn database(&self) -> &fontdb::Database {
        &self.db
    }

    /// Number of indexed faces
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Sorted, de-duplicated primary family names
    pub fn families(&self) -> Vec<String> {
        self.db
            .faces()
            .filter_map(|face| face.families.first().map(|(name, _)| name.clone()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn hinting(&self) -> (bool, HintStyle) {
        (self.config.hinting, self.config.hintstyle)
    }

    fn is_color(&self, id: fontdb::ID) -> bool {
        if let Some(known) = self.color.lock().get(&id) {
            return *known;
        }
        let value = coverage::is_color(&self.db, id);
        self.color.lock().insert(id, value);
        value
    }

    /// Concrete family names a requested family stands for
    fn family_names(&self, family: &str) -> Vec<String> {
        match GenericFamily::parse(family) {
            Some(generic) => generic.candidates(&self.config, &self.db),
            None => vec![family.trim().to_string()],
        }
    }

    /// The name a face stores for `wanted`, compared case-insensitively
    fn stored_name(&self, wanted: &str) -> Option<&str> {
        self.db.faces().find_map(|face| {
            face.families
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
                .map(|(name, _)| name.as_str())
        })
    }

    fn face_matches(face: &fontdb::FaceInfo, names: &[String]) -> bool {
        face.families
            .iter()
            .any(|(name, _)| names.iter().any(|n| n.eq_ignore_ascii_case(name)))
    }

    fn describe(&self, id: fontdb::ID, family: &str) -> Option<FontDescriptor> {
        let face = self.db.face(id)?;
        let path = face_path(face)?;
        let (hinting, hintstyle) = self.hinting();
        Some(FontDescriptor {
            path,
            index: face.index,
            hinting,
            hintstyle,
            family: family.to_string(),
            is_color: self.is_color(id),
        })
    }

    fn query(&self, family: &str, style: FaceStyle) -> Option<FontDescriptor> {
        let stored = self.stored_name(family)?;
        let families = [fontdb::Family::Name(stored)];
        let query = fontdb::Query {
            families: &families,
            weight: fontdb::Weight(style.weight()),
            stretch: fontdb::Stretch::Normal,
            style: if style.italic {
                fontdb::Style::Italic
            } else {
                fontdb::Style::Normal
            },
        };
        let id = self.db.query(&query)?;
        self.describe(id, stored)
    }

    /// Best style match among monospaced faces, when no name matched
    fn any_monospaced(&self, style: FaceStyle) -> Option<FontDescriptor> {
        let (id, family) = self
            .db
            .faces()
            .filter(|face| face.monospaced && face_path(face).is_some())
            .min_by_key(|face| style_distance(face, style))
            .and_then(|face| Some((face.id, face.families.first()?.0.clone())))?;
        self.describe(id, &family)
    }

    fn search_fallback(&self, key: &FallbackKey) -> Option<FontDescriptor> {
        let names = self.family_names(&key.family);
        let best = self
            .db
            .faces()
            .enumerate()
            .filter(|(_, face)| face_path(face).is_some())
            .filter_map(|(order, face)| {
                let found = coverage::coverage(&self.db, face.id, key.ch);
                if !found.covers {
                    return None;
                }
                self.color.lock().insert(face.id, found.is_color);
                let rank = fallback_rank(
                    found.is_color,
                    key.prefer_color,
                    Self::face_matches(face, &names),
                    style_distance(face, key.style),
                    order,
                );
                Some((rank, face))
            })
            .min_by_key(|(rank, _)| *rank)?;

        let face = best.1;
        let family = face
            .families
            .first()
            .map(|(name, _)| name.clone())
            .unwrap_or_default();
        self.describe(face.id, &family)
    }
}

impl FontResolver for SystemFontResolver {
    fn name(&self) -> &'static str {
        "fontdb"
    }

    fn information_for_font_family(
        &self,
        family: Option<&str>,
        style: FaceStyle,
    ) -> Result<FontDescriptor> {
        let requested = match family.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.main_face.read().family.clone(),
        };

        let names = self.family_names(&requested);
        let found = names
            .iter()
            .find_map(|name| self.query(name, style))
            .or_else(|| {
                (GenericFamily::parse(&requested) == Some(GenericFamily::Monospace))
                    .then(|| self.any_monospaced(style))
                    .flatten()
            });

        match found {
            Some(descriptor) => {
                log::debug!("Resolved '{}' {} to {}", requested, style, descriptor);
                Ok(descriptor)
            },
            None => {
                if self.db.is_empty() {
                    log::warn!("No fonts indexed; cannot resolve '{}'", requested);
                }
                Err(ResolveError::FamilyNotFound(requested).into())
            },
        }
    }

    fn fallback_font(
        &self,
        ch: char,
        family: Option<&str>,
        style: FaceStyle,
        prefer_color: bool,
    ) -> Result<FontDescriptor> {
        let family = match family.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.main_face.read().family.clone(),
        };
        let key = FallbackKey {
            ch,
            family: family.to_ascii_lowercase(),
            style,
            prefer_color,
        };

        if let Some(cached) = self.fallbacks.lock().get(&key) {
            return cached.clone().ok_or_else(|| ResolveError::NoCoverage { ch }.into());
        }

        let found = self.search_fallback(&key);
        match &found {
            Some(descriptor) => log::debug!(
                "Fallback for U+{:04X} ({} {}): {}",
                u32::from(ch),
                family,
                style,
                descriptor
            ),
            None => log::debug!("No installed face covers U+{:04X}", u32::from(ch)),
        }
        self.fallbacks.lock().put(key, found.clone());
        found.ok_or_else(|| ResolveError::NoCoverage { ch }.into())
    }

    fn set_main_face_family(&self, family: &str, style: FaceStyle) {
        let family = family.trim();
        let family = if family.is_empty() {
            uitext_core::DEFAULT_FAMILY
        } else {
            family
        };
        log::debug!("Main face set to '{}' {}", family, style);
        *self.main_face.write() = MainFace::new(family, style);
    }

    fn main_face(&self) -> MainFace {
        self.main_face.read().clone()
    }
}

fn face_path(face: &fontdb::FaceInfo) -> Option<PathBuf> {
    match &face.source {
        fontdb::Source::File(path) => Some(path.clone()),
        fontdb::Source::SharedFile(path, _) => Some(path.clone()),
        fontdb::Source::Binary(_) => None,
    }
}

fn style_distance(face: &fontdb::FaceInfo, style: FaceStyle) -> u32 {
    let italic = matches!(face.style, fontdb::Style::Italic | fontdb::Style::Oblique);
    slant_weight_distance(italic, face.weight.0, style)
}

/// How far a face is from the requested style; italic counts most
fn slant_weight_distance(italic: bool, weight: u16, style: FaceStyle) -> u32 {
    let slant = if italic == style.italic { 0 } else { 10 };
    let weight = (i32::from(weight) - i32::from(style.weight())).unsigned_abs() / 100;
    slant + weight
}

/// Sort key for a covering face; lower wins
fn fallback_rank(
    is_color: bool,
    prefer_color: bool,
    family_match: bool,
    style_distance: u32,
    order: usize,
) -> (u8, u8, u32, usize) {
    (
        u8::from(is_color != prefer_color),
        u8::from(!family_match),
        style_distance,
        order,
    )
}

fn expand_dir(dir: &std::path::Path) -> PathBuf {
    let raw = dir.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => dir.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uitext_core::UitextError;

    fn empty() -> SystemFontResolver {
        SystemFontResolver::from_database(fontdb::Database::new(), &Config::isolated([]))
    }

    #[test]
    fn test_main_face_defaults_to_monospace() {
        let resolver = empty();
        assert_eq!(resolver.main_face(), MainFace::default());
    }

    #[test]
    fn test_set_main_face_family() {
        let resolver = empty();
        resolver.set_main_face_family("Fira Code", FaceStyle::BOLD);
        assert_eq!(resolver.main_face(), MainFace::new("Fira Code", FaceStyle::BOLD));
        resolver.set_main_face_family("   ", FaceStyle::REGULAR);
        assert_eq!(resolver.main_face().family, "monospace");
    }

    #[test]
    fn test_empty_database_reports_family_not_found() {
        let resolver = empty();
        let err = resolver
            .information_for_font_family(Some("DejaVu Sans"), FaceStyle::REGULAR)
            .unwrap_err();
        assert!(matches!(
            &err,
            UitextError::Resolve(ResolveError::FamilyNotFound(name)) if name == "DejaVu Sans"
        ));
        assert_eq!(resolver.face_count(), 0);
        assert!(resolver.families().is_empty());
    }

    #[test]
    fn test_no_coverage_is_memoized() {
        let resolver = empty();
        for _ in 0..2 {
            let err = resolver
                .fallback_font('\u{10FFFD}', None, FaceStyle::REGULAR, false)
                .unwrap_err();
            assert!(matches!(
                err,
                UitextError::Resolve(ResolveError::NoCoverage { ch: '\u{10FFFD}' })
            ));
        }
        assert_eq!(resolver.fallbacks.lock().len(), 1);
    }

    #[test]
    fn test_zero_fallback_capacity_clamps_to_one() {
        let config = Config {
            fallback_cache_size: 0,
            ..Config::isolated([])
        };
        let resolver = SystemFontResolver::from_database(fontdb::Database::new(), &config);
        assert_eq!(resolver.fallbacks.lock().cap().get(), 1);
    }

    #[test]
    fn test_style_distance_weighs_slant_over_weight() {
        assert_eq!(slant_weight_distance(false, 400, FaceStyle::REGULAR), 0);
        assert_eq!(slant_weight_distance(false, 700, FaceStyle::REGULAR), 3);
        assert_eq!(slant_weight_distance(true, 400, FaceStyle::REGULAR), 10);
        assert_eq!(slant_weight_distance(true, 700, FaceStyle::REGULAR), 13);
        assert_eq!(slant_weight_distance(true, 700, FaceStyle::BOLD_ITALIC), 0);
        // Any slant mismatch loses to the heaviest weight mismatch
        assert!(
            slant_weight_distance(false, 900, FaceStyle::REGULAR)
                < slant_weight_distance(true, 400, FaceStyle::REGULAR)
        );
    }

    #[test]
    fn test_color_face_wins_when_preferred() {
        let color = fallback_rank(true, true, false, 13, 9);
        let plain = fallback_rank(false, true, true, 0, 0);
        assert!(color < plain);
    }

    #[test]
    fn test_color_face_loses_when_not_preferred() {
        let color = fallback_rank(true, false, true, 0, 0);
        let plain = fallback_rank(false, false, false, 13, 9);
        assert!(plain < color);
    }

    #[test]
    fn test_family_then_style_then_order() {
        let family = fallback_rank(false, false, true, 13, 9);
        let stranger = fallback_rank(false, false, false, 0, 0);
        assert!(family < stranger);

        let near = fallback_rank(false, false, true, 0, 9);
        let far = fallback_rank(false, false, true, 3, 0);
        assert!(near < far);

        let first = fallback_rank(false, false, true, 3, 1);
        let second = fallback_rank(false, false, true, 3, 2);
        assert!(first < second);
    }

    #[test]
    fn test_expand_dir_keeps_plain_paths() {
        assert_eq!(
            expand_dir(std::path::Path::new("/usr/share/fonts")),
            PathBuf::from("/usr/share/fonts")
        );
    }
}
