// this_file: crates/uitext-core/src/error.rs

//! Error types for uitext

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, UitextError>;

/// Main error type for uitext
#[derive(Debug, Error)]
pub enum UitextError {
    #[error("Font resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Font loading failed: {0}")]
    Load(#[from] LoadError),

    #[error("Glyph engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl UitextError {
    /// Engine error code closest to this failure, for diagnostics
    pub fn engine_code(&self) -> EngineErrorCode {
        match self {
            Self::Load(err) => err.code(),
            Self::Engine(err) => err.code(),
            Self::Render(RenderError::InvalidSize(_)) => EngineErrorCode::InvalidPixelSize,
            Self::Render(_) => EngineErrorCode::InvalidArgument,
            Self::Resolve(_) => EngineErrorCode::CannotOpenResource,
            Self::Io(_) => EngineErrorCode::CannotOpenResource,
        }
    }
}

/// Font resolution errors
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("No installed font matches family '{0}'")]
    FamilyNotFound(String),

    #[error("No installed font covers U+{:04X}", codepoint(.ch))]
    NoCoverage { ch: char },
}

fn codepoint(ch: &char) -> u32 {
    u32::from(*ch)
}

/// Font loading errors
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot open font file {}: {}", path.display(), source)]
    CannotOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Font file too large: {} bytes (max: {} bytes) at {}", size, max, path.display())]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("Unknown font format at {}: {}", path.display(), reason)]
    UnknownFormat { path: PathBuf, reason: String },

    #[error("Face index {} out of range for {} ({} faces)", index, path.display(), count)]
    InvalidFaceIndex { path: PathBuf, index: u32, count: u32 },
}

impl LoadError {
    pub fn code(&self) -> EngineErrorCode {
        match self {
            Self::CannotOpen { .. } => EngineErrorCode::CannotOpenResource,
            Self::TooLarge { .. } => EngineErrorCode::OutOfMemory,
            Self::UnknownFormat { .. } => EngineErrorCode::UnknownFileFormat,
            Self::InvalidFaceIndex { .. } => EngineErrorCode::InvalidArgument,
        }
    }
}

/// Glyph engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid bitmap: {0}")]
    InvalidBitmap(String),

    #[error("Glyph {0} not found")]
    GlyphNotFound(u32),

    #[error("Failed to draw outline of glyph {glyph}: {reason}")]
    Outline { glyph: u32, reason: String },

    #[error("Invalid font data: {0}")]
    InvalidFont(String),

    #[error("Pixel size {0} out of range")]
    InvalidPixelSize(f32),
}

impl EngineError {
    pub fn code(&self) -> EngineErrorCode {
        match self {
            Self::InvalidBitmap(_) => EngineErrorCode::InvalidArgument,
            Self::GlyphNotFound(_) => EngineErrorCode::InvalidGlyphIndex,
            Self::Outline { .. } => EngineErrorCode::InvalidOutline,
            Self::InvalidFont(_) => EngineErrorCode::InvalidFileFormat,
            Self::InvalidPixelSize(_) => EngineErrorCode::InvalidPixelSize,
        }
    }
}

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid pixel size: {0}")]
    InvalidSize(u32),

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Output buffer too small: need {needed} pixels, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("Text must be a single line")]
    MultiLine,

    #[error("Failed to rasterize glyph {glyph}: {reason}")]
    Rasterize { glyph: u32, reason: String },
}

/// Numeric error codes surfaced through the engine's diagnostic recorder
///
/// The numbering follows FreeType so codes read the same in logs from
/// either stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum EngineErrorCode {
    Ok = 0x00,
    CannotOpenResource = 0x01,
    UnknownFileFormat = 0x02,
    InvalidFileFormat = 0x03,
    InvalidArgument = 0x06,
    InvalidGlyphIndex = 0x10,
    InvalidPixelSize = 0x17,
    InvalidOutline = 0x14,
    OutOfMemory = 0x40,
}

impl EngineErrorCode {
    const ALL: [EngineErrorCode; 9] = [
        Self::Ok,
        Self::CannotOpenResource,
        Self::UnknownFileFormat,
        Self::InvalidFileFormat,
        Self::InvalidArgument,
        Self::InvalidGlyphIndex,
        Self::InvalidPixelSize,
        Self::InvalidOutline,
        Self::OutOfMemory,
    ];

    /// Look up a code from its raw value
    pub fn from_raw(raw: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|code| code.raw() == raw)
    }

    pub const fn raw(self) -> i32 {
        self as i32
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::Ok => "no error",
            Self::CannotOpenResource => "cannot open resource",
            Self::UnknownFileFormat => "unknown file format",
            Self::InvalidFileFormat => "broken file",
            Self::InvalidArgument => "invalid argument",
            Self::InvalidGlyphIndex => "invalid glyph index",
            Self::InvalidPixelSize => "invalid pixel size",
            Self::InvalidOutline => "invalid outline",
            Self::OutOfMemory => "out of memory",
        }
    }

    /// Message for a raw code, including codes we don't know
    pub fn describe(raw: i32) -> &'static str {
        Self::from_raw(raw).map_or("unknown error", Self::message)
    }
}
