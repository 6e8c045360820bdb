// this_file: crates/uitext-fontdb/src/coverage.rs

//! Looking inside indexed faces
//!
//! fontdb only records names and style. Whether a face covers a character
//! or carries color glyphs means reading its tables, which fontdb lets us do
//! through `with_face_data` without keeping the file around.

use read_fonts::{types::Tag, FontRef as ReadFontRef};
use skrifa::MetadataProvider;

const COLOR_TABLES: [Tag; 4] = [
    Tag::new(b"COLR"),
    Tag::new(b"CBDT"),
    Tag::new(b"sbix"),
    Tag::new(b"SVG "),
];

/// What one face can do for one character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Coverage {
    pub covers: bool,
    pub is_color: bool,
}

pub(crate) fn coverage(db: &fontdb::Database, id: fontdb::ID, ch: char) -> Coverage {
    db.with_face_data(id, |data, index| coverage_of(data, index, ch))
        .unwrap_or_default()
}

pub(crate) fn is_color(db: &fontdb::Database, id: fontdb::ID) -> bool {
    db.with_face_data(id, |data, index| {
        ReadFontRef::from_index(data, index)
            .map(|font| has_color_tables(&font))
            .unwrap_or(false)
    })
    .unwrap_or(false)
}

fn coverage_of(data: &[u8], index: u32, ch: char) -> Coverage {
    let covers = skrifa::FontRef::from_index(data, index)
        .ok()
        .and_then(|font| font.charmap().map(ch))
        .is_some_and(|gid| gid.to_u32() != 0);
    let is_color = ReadFontRef::from_index(data, index)
        .map(|font| has_color_tables(&font))
        .unwrap_or(false);
    Coverage { covers, is_color }
}

fn has_color_tables(font: &ReadFontRef<'_>) -> bool {
    COLOR_TABLES.iter().any(|tag| font.table_data(*tag).is_some())
}
