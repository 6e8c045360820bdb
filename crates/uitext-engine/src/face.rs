// this_file: crates/uitext-engine/src/face.rs

//! A font face mapped from disk
//!
//! The file is memory-mapped once and parsed on demand, so a face costs a
//! mapping plus a few header fields no matter how many glyphs get drawn.
//! Collections (TTC/OTC) are validated against the requested index up
//! front; that is the only place a bad index can surface.

use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use read_fonts::{types::Tag, FileRef, FontRef as ReadFontRef, TableProvider};
use skrifa::instance::{LocationRef, Size};
use skrifa::{GlyphId, MetadataProvider, string::StringId};
use uitext_core::error::{EngineError, LoadError};

use crate::raster::{GlyphImage, GlyphRasterizer, HintSettings};

/// Maximum font file size (50MB) to prevent resource exhaustion.
pub const MAX_FONT_SIZE: u64 = 50 * 1024 * 1024;

/// Tables that mark a face as carrying color glyphs
const COLOR_TABLES: [Tag; 4] = [
    Tag::new(b"COLR"),
    Tag::new(b"CBDT"),
    Tag::new(b"sbix"),
    Tag::new(b"SVG "),
];

/// Vertical metrics scaled to a pixel size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    /// Distance from baseline to the top of the line box
    pub ascent: f32,
    /// Distance from baseline to the bottom of the line box (positive)
    pub descent: f32,
    pub leading: f32,
}

impl LineMetrics {
    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// One face of a font file, ready for glyph lookups
pub struct Face {
    path: PathBuf,
    index: u32,
    data: Mmap,
    units_per_em: u16,
    glyph_count: u32,
    is_color: bool,
    family_name: Option<String>,
}

impl std::fmt::Debug for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Face")
            .field("path", &self.path)
            .field("index", &self.index)
            .field("units_per_em", &self.units_per_em)
            .field("glyph_count", &self.glyph_count)
            .field("is_color", &self.is_color)
            .finish()
    }
}

impl Face {
    /// Map `path` and select face `index`
    pub fn open(path: &Path, index: u32) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::CannotOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let meta = file.metadata().map_err(|source| LoadError::CannotOpen {
            path: path.to_path_buf(),
            source,
        })?;
        if meta.is_dir() {
            return Err(LoadError::CannotOpen {
                path: path.to_path_buf(),
                source: std::io::Error::new(ErrorKind::InvalidInput, "is a directory"),
            });
        }
        if meta.len() > MAX_FONT_SIZE {
            return Err(LoadError::TooLarge {
                path: path.to_path_buf(),
                size: meta.len(),
                max: MAX_FONT_SIZE,
            });
        }

        if meta.len() == 0 {
            return Err(LoadError::UnknownFormat {
                path: path.to_path_buf(),
                reason: "empty file".to_string(),
            });
        }

        // The mapping is read-only and owned by the face for its whole life.
        #[allow(unsafe_code)]
        let data = unsafe { Mmap::map(&file) }.map_err(|source| LoadError::CannotOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let count = match FileRef::new(&data) {
            Ok(FileRef::Font(_)) => 1,
            Ok(FileRef::Collection(collection)) => collection.len(),
            Err(e) => {
                return Err(LoadError::UnknownFormat {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })
            },
        };
        if index >= count {
            return Err(LoadError::InvalidFaceIndex {
                path: path.to_path_buf(),
                index,
                count,
            });
        }

        let font = ReadFontRef::from_index(&data, index).map_err(|e| LoadError::UnknownFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let units_per_em = font.head().map(|head| head.units_per_em()).unwrap_or(1000);
        let glyph_count = font.maxp().map(|maxp| maxp.num_glyphs() as u32).unwrap_or(0);
        let is_color = COLOR_TABLES
            .iter()
            .any(|tag| font.table_data(*tag).is_some());

        let family_name = skrifa::FontRef::from_index(&data, index)
            .ok()
            .and_then(|font| {
                let strings = font.localized_strings(StringId::TYPOGRAPHIC_FAMILY_NAME);
                let typographic = strings.english_or_first().map(|s| s.to_string());
                typographic.or_else(|| {
                    font.localized_strings(StringId::FAMILY_NAME)
                        .english_or_first()
                        .map(|s| s.to_string())
                })
            });

        log::debug!(
            "Loaded face {}#{} ({} glyphs, upem {}, color: {})",
            path.display(),
            index,
            glyph_count,
            units_per_em,
            is_color
        );

        Ok(Self {
            path: path.to_path_buf(),
            index,
            data,
            units_per_em,
            glyph_count,
            is_color,
            family_name,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    pub fn glyph_count(&self) -> u32 {
        self.glyph_count
    }

    pub fn is_color(&self) -> bool {
        self.is_color
    }

    pub fn family_name(&self) -> Option<&str> {
        self.family_name.as_deref()
    }

    /// Raw bytes of the whole file
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Parse the face for skrifa; cheap, nothing is copied
    pub fn font_ref(&self) -> Result<skrifa::FontRef<'_>, EngineError> {
        skrifa::FontRef::from_index(&self.data, self.index)
            .map_err(|e| EngineError::InvalidFont(e.to_string()))
    }

    /// The glyph drawing `ch`, or `None` when the face lacks it
    pub fn glyph_id(&self, ch: char) -> Option<u32> {
        self.font_ref()
            .ok()?
            .charmap()
            .map(ch)
            .map(|gid| gid.to_u32())
            .filter(|gid| *gid != 0)
    }

    pub fn has_glyph(&self, ch: char) -> bool {
        self.glyph_id(ch).is_some()
    }

    /// Horizontal advance of `glyph` in pixels
    pub fn advance(&self, glyph: u32, size_px: f32) -> f32 {
        self.font_ref()
            .ok()
            .and_then(|font| {
                font.glyph_metrics(Size::new(size_px), LocationRef::default())
                    .advance_width(GlyphId::new(glyph))
            })
            .unwrap_or(0.0)
    }

    /// Line box metrics at `size_px`
    pub fn line_metrics(&self, size_px: f32) -> LineMetrics {
        match self.font_ref() {
            Ok(font) => {
                let metrics = font.metrics(Size::new(size_px), LocationRef::default());
                LineMetrics {
                    ascent: metrics.ascent,
                    descent: -metrics.descent,
                    leading: metrics.leading,
                }
            },
            Err(_) => LineMetrics {
                ascent: size_px * 0.8,
                descent: size_px * 0.2,
                leading: 0.0,
            },
        }
    }

    /// Prepare to draw glyphs of this face at one size
    pub fn rasterizer(
        &self,
        size_px: f32,
        hint: HintSettings,
    ) -> Result<GlyphRasterizer<'_>, EngineError> {
        GlyphRasterizer::new(self, size_px, hint)
    }

    /// One-off rasterization; prefer [`Face::rasterizer`] for whole lines
    pub fn rasterize(
        &self,
        glyph: u32,
        size_px: f32,
        hint: HintSettings,
        x_fract: f32,
    ) -> Result<Option<GlyphImage>, EngineError> {
        self.rasterizer(size_px, hint)?.render(glyph, x_fract)
    }
}
