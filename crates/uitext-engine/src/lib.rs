// this_file: crates/uitext-engine/src/lib.rs

//! The glyph engine: faces from disk, coverage out
//!
//! A [`GlyphEngine`] owns a small LRU of memory-mapped faces keyed by
//! `(path, index)` and a recorder for the last error code it reported.
//! Most callers share one engine per process through [`GlyphEngine::shared`];
//! tests and embedders that want their own cache build one with
//! [`GlyphEngine::new`].
//!
//! ```no_run
//! use uitext_engine::{GlyphEngine, HintSettings};
//!
//! let engine = GlyphEngine::shared();
//! let face = engine.native_face_from_path("/usr/share/fonts/DejaVuSans.ttf", 0)?;
//! if let Some(glyph) = face.glyph_id('A') {
//!     let image = face.rasterize(glyph, 16.0, HintSettings::NONE, 0.0)?;
//!     println!("{:?}", image.map(|i| (i.bitmap.width, i.bitmap.rows)));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod convert;
mod diagnostics;
mod face;
mod raster;

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use lru::LruCache;
use parking_lot::Mutex;
use uitext_core::error::{EngineError, LoadError};
use uitext_core::{Bitmap, Config};

pub use convert::convert_mono_bitmap;
pub use diagnostics::Diagnostic;
pub use face::{Face, LineMetrics, MAX_FONT_SIZE};
pub use raster::{GlyphImage, GlyphRasterizer, HintSettings, MAX_MASK_AREA, MAX_PIXEL_SIZE};

use diagnostics::ErrorRecorder;

const DEFAULT_FACE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(32) {
    Some(v) => v,
    None => unreachable!(),
};

static SHARED: OnceLock<Arc<GlyphEngine>> = OnceLock::new();

/// Process-wide engine handle
pub fn library() -> Arc<GlyphEngine> {
    GlyphEngine::shared()
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct FaceKey {
    path: PathBuf,
    index: u32,
}

/// Cache occupancy, for logs and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub capacity: usize,
    pub entries: usize,
}

pub struct GlyphEngine {
    faces: Mutex<LruCache<FaceKey, Arc<Face>>>,
    capacity: NonZeroUsize,
    diagnostics: ErrorRecorder,
}

impl std::fmt::Debug for GlyphEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphEngine")
            .field("stats", &self.stats())
            .field("errors", &self.error_count())
            .finish()
    }
}

impl Default for GlyphEngine {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_FACE_CAPACITY.get())
    }
}

impl GlyphEngine {
    /// An isolated engine sized from `config`
    pub fn new(config: &Config) -> Self {
        Self::with_capacity(config.face_cache_size)
    }

    pub fn with_capacity(faces: usize) -> Self {
        let capacity = NonZeroUsize::new(faces).unwrap_or(NonZeroUsize::MIN);
        Self {
            faces: Mutex::new(LruCache::new(capacity)),
            capacity,
            diagnostics: ErrorRecorder::default(),
        }
    }

    /// The engine every caller in this process shares
    ///
    /// Created on first use from [`Config::from_env`]; later calls return
    /// the same `Arc`.
    pub fn shared() -> Arc<GlyphEngine> {
        Arc::clone(SHARED.get_or_init(|| {
            log::debug!("Initializing shared glyph engine");
            Arc::new(GlyphEngine::new(&Config::from_env()))
        }))
    }

    /// Load face `index` of the font file at `path`
    ///
    /// Faces stay cached until pushed out by newer ones; a cached face is
    /// returned without touching the disk.
    pub fn native_face_from_path(
        &self,
        path: impl AsRef<Path>,
        index: u32,
    ) -> Result<Arc<Face>, LoadError> {
        let path = path.as_ref();
        let key = FaceKey {
            path: path.canonicalize().unwrap_or_else(|_| path.to_path_buf()),
            index,
        };

        if let Some(face) = self.faces.lock().get(&key) {
            return Ok(Arc::clone(face));
        }

        match Face::open(&key.path, index) {
            Ok(face) => {
                let face = Arc::new(face);
                let mut faces = self.faces.lock();
                if let Some((evicted, _)) = faces.push(key.clone(), Arc::clone(&face)) {
                    if evicted != key {
                        log::debug!("Evicted face {}#{}", evicted.path.display(), evicted.index);
                    }
                }
                Ok(face)
            },
            Err(err) => {
                self.set_error(
                    &format!("Failed to load face {}#{}", path.display(), index),
                    err.code().raw(),
                );
                Err(err)
            },
        }
    }

    /// [`convert_mono_bitmap`], recording failures
    pub fn convert_mono_bitmap(&self, src: &Bitmap) -> Result<Bitmap, EngineError> {
        convert::convert_mono_bitmap(src).map_err(|err| {
            self.set_error("Failed to convert bitmap", err.code().raw());
            err
        })
    }

    /// Log `prefix` with the message for `code` and keep it as the last error
    pub fn set_error(&self, prefix: &str, code: i32) {
        self.diagnostics.record(prefix, code);
    }

    pub fn last_error(&self) -> Option<Diagnostic> {
        self.diagnostics.last()
    }

    /// Errors recorded since the engine was created
    pub fn error_count(&self) -> u64 {
        self.diagnostics.count()
    }

    pub fn clear_error(&self) {
        self.diagnostics.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            capacity: self.capacity.get(),
            entries: self.faces.lock().len(),
        }
    }

    /// Drop every cached face; faces still held elsewhere stay alive
    pub fn clear_cache(&self) {
        self.faces.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uitext_core::EngineErrorCode;

    #[test]
    fn test_shared_is_pointer_equal() {
        let a = GlyphEngine::shared();
        let b = library();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_isolated_engines_are_distinct() {
        let a = GlyphEngine::new(&Config::default());
        let b = GlyphEngine::new(&Config::default());
        a.set_error("only here", 0x06);
        assert!(a.last_error().is_some());
        assert!(b.last_error().is_none());
    }

    #[test]
    fn test_missing_file_fails_for_every_index() {
        let engine = GlyphEngine::default();
        for index in [0, 1, 7, u32::MAX] {
            let err = engine
                .native_face_from_path("/definitely/not/here.ttf", index)
                .unwrap_err();
            assert!(matches!(err, LoadError::CannotOpen { .. }));
        }
        assert_eq!(engine.error_count(), 4);
        let last = engine.last_error().unwrap();
        assert_eq!(last.code, EngineErrorCode::CannotOpenResource.raw());
        assert!(last.to_string().contains("(error 0x01)"));
        assert_eq!(engine.stats().entries, 0);
    }

    #[test]
    fn test_zero_capacity_clamps_to_one() {
        let engine = GlyphEngine::with_capacity(0);
        assert_eq!(engine.stats().capacity, 1);
    }

    #[test]
    fn test_convert_failure_is_recorded() {
        let engine = GlyphEngine::default();
        let bad = Bitmap::mono(64, 64, vec![0; 3]);
        assert!(engine.convert_mono_bitmap(&bad).is_err());
        assert_eq!(
            engine.last_error().map(|d| d.code),
            Some(EngineErrorCode::InvalidArgument.raw())
        );
    }

    #[test]
    fn test_set_error_keeps_control_flow() {
        let engine = GlyphEngine::default();
        engine.set_error("Custom prefix", 0x17);
        engine.set_error("Another", 0x40);
        let last = engine.last_error().unwrap();
        assert_eq!(last.to_string(), "Another (error 0x40) out of memory");
        engine.clear_error();
        assert!(engine.last_error().is_none());
        assert_eq!(engine.error_count(), 2);
    }
}
