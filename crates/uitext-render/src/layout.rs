// this_file: crates/uitext-render/src/layout.rs

//! Placing one line of characters, no shaping
//!
//! Each character becomes one glyph advanced by its own width, the way a
//! terminal tab title needs it and nothing more. Characters the main face
//! lacks come from a fallback face; when nothing covers them the main
//! face's `.notdef` box stands in.

use std::sync::Arc;

use uitext_core::{FaceStyle, FontResolver, ELLIPSIS};
use uitext_engine::{Face, GlyphEngine, HintSettings};

/// A face taking part in the line, with the hinting its descriptor asked for
#[derive(Debug, Clone)]
pub struct FaceSlot {
    pub face: Arc<Face>,
    pub hint: HintSettings,
}

/// One positioned glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub ch: char,
    /// Index into [`LineLayout::faces`]
    pub face: usize,
    pub glyph: u32,
    /// Pen position relative to the start of the line
    pub x: f32,
    pub advance: f32,
}

#[derive(Debug, Clone)]
pub struct LineLayout {
    /// `faces[0]` is always the main face
    pub faces: Vec<FaceSlot>,
    pub glyphs: Vec<PlacedGlyph>,
    /// Total advance of every glyph
    pub width: f32,
    /// Trailing glyphs were replaced by an ellipsis
    pub truncated: bool,
}

impl LineLayout {
    pub fn text(&self) -> String {
        self.glyphs.iter().map(|g| g.ch).collect()
    }
}

/// How much of an overlong line survives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Truncation {
    pub keep: usize,
    pub ellipsis: bool,
}

/// Keep the longest prefix that still leaves room for the ellipsis
///
/// When even a lone ellipsis is too wide, everything is kept and the
/// canvas clips the line.
pub(crate) fn truncate(advances: &[f32], ellipsis: f32, available: f32) -> Truncation {
    let total: f32 = advances.iter().sum();
    if total <= available {
        return Truncation {
            keep: advances.len(),
            ellipsis: false,
        };
    }
    if ellipsis > available {
        return Truncation {
            keep: advances.len(),
            ellipsis: false,
        };
    }
    let mut width = 0.0;
    let mut keep = 0;
    for advance in advances {
        if width + advance + ellipsis > available {
            break;
        }
        width += advance;
        keep += 1;
    }
    Truncation {
        keep,
        ellipsis: true,
    }
}

pub(crate) struct LineBuilder<'a> {
    resolver: &'a dyn FontResolver,
    engine: &'a GlyphEngine,
    style: FaceStyle,
    size: f32,
    faces: Vec<FaceSlot>,
}

impl<'a> LineBuilder<'a> {
    pub(crate) fn new(
        resolver: &'a dyn FontResolver,
        engine: &'a GlyphEngine,
        main: FaceSlot,
        style: FaceStyle,
        size: f32,
    ) -> Self {
        Self {
            resolver,
            engine,
            style,
            size,
            faces: vec![main],
        }
    }

    /// Face slot and glyph that will draw `ch`
    fn resolve(&mut self, ch: char) -> (usize, u32) {
        if let Some(glyph) = self.faces[0].face.glyph_id(ch) {
            return (0, glyph);
        }
        // Faces already pulled in by earlier fallbacks are the likeliest hit
        for (slot, entry) in self.faces.iter().enumerate().skip(1) {
            if let Some(glyph) = entry.face.glyph_id(ch) {
                return (slot, glyph);
            }
        }

        let descriptor = match self.resolver.fallback_font(ch, None, self.style, false) {
            Ok(descriptor) => descriptor,
            Err(err) => {
                log::debug!("Using .notdef for U+{:04X}: {}", u32::from(ch), err);
                return (0, 0);
            },
        };
        let face = match self
            .engine
            .native_face_from_path(&descriptor.path, descriptor.index)
        {
            Ok(face) => face,
            Err(err) => {
                log::warn!("Skipping fallback {} for U+{:04X}: {}", descriptor, u32::from(ch), err);
                return (0, 0);
            },
        };
        let Some(glyph) = face.glyph_id(ch) else {
            log::warn!("Fallback {} lacks U+{:04X}", descriptor, u32::from(ch));
            return (0, 0);
        };

        let slot = self
            .faces
            .iter()
            .position(|entry| Arc::ptr_eq(&entry.face, &face))
            .unwrap_or_else(|| {
                self.faces.push(FaceSlot {
                    face,
                    hint: HintSettings::from_descriptor(&descriptor),
                });
                self.faces.len() - 1
            });
        (slot, glyph)
    }

    fn place(&mut self, ch: char) -> PlacedGlyph {
        let (face, glyph) = self.resolve(ch);
        PlacedGlyph {
            ch,
            face,
            glyph,
            x: 0.0,
            advance: self.faces[face].face.advance(glyph, self.size),
        }
    }

    /// Lay out `text`, fitting it into `available` pixels when given
    pub(crate) fn build(mut self, text: &str, available: Option<f32>) -> LineLayout {
        let mut glyphs: Vec<PlacedGlyph> = text
            .chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| self.place(ch))
            .collect();

        let mut truncated = false;
        if let Some(available) = available {
            let advances: Vec<f32> = glyphs.iter().map(|g| g.advance).collect();
            let total: f32 = advances.iter().sum();
            if total > available {
                let ellipsis = self.place(ELLIPSIS);
                let cut = truncate(&advances, ellipsis.advance, available);
                if cut.ellipsis {
                    glyphs.truncate(cut.keep);
                    glyphs.push(ellipsis);
                    truncated = true;
                }
            }
        }

        let mut x = 0.0;
        for glyph in &mut glyphs {
            glyph.x = x;
            x += glyph.advance;
        }

        LineLayout {
            faces: self.faces,
            glyphs,
            width: x,
            truncated,
        }
    }
}
