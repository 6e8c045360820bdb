// this_file: crates/uitext-engine/src/diagnostics.rs

//! Side-channel for engine error codes
//!
//! Failures still travel as `Result`s. The recorder exists so a caller who
//! only sees "render failed" can ask what the engine last complained about.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use uitext_core::EngineErrorCode;

/// One recorded engine complaint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub prefix: String,
    pub code: i32,
    pub message: &'static str,
}

impl Diagnostic {
    pub fn new(prefix: &str, code: i32) -> Self {
        Self {
            prefix: prefix.trim_end().to_string(),
            code,
            message: EngineErrorCode::describe(code),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (error {:#04x}) {}", self.prefix, self.code, self.message)
    }
}

#[derive(Debug, Default)]
pub(crate) struct ErrorRecorder {
    last: Mutex<Option<Diagnostic>>,
    count: AtomicU64,
}

impl ErrorRecorder {
    pub(crate) fn record(&self, prefix: &str, code: i32) {
        let diagnostic = Diagnostic::new(prefix, code);
        log::error!("{}", diagnostic);
        self.count.fetch_add(1, Ordering::Relaxed);
        *self.last.lock() = Some(diagnostic);
    }

    pub(crate) fn last(&self) -> Option<Diagnostic> {
        self.last.lock().clone()
    }

    pub(crate) fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub(crate) fn clear(&self) {
        *self.last.lock() = None;
    }
}
