//! Side-channel for document read/write failures.
//!
//! Business-rule failures surface to the caller as `StoreError`; persistence
//! failures do not. A failed read degrades to an empty collection and a
//! failed write leaves the document untouched, in both cases reporting here
//! instead. The sink is injectable so tests can observe what was swallowed.

use std::sync::Mutex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentOp {
    Read,
    Write,
}

impl DocumentOp {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersistenceWarning {
    pub collection: &'static str,
    pub op: DocumentOp,
    pub detail: String,
}

pub trait WarningSink: Send + Sync {
    fn report(&self, warning: PersistenceWarning);
}

/// Default sink: logs and moves on.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingWarningSink;

impl WarningSink for TracingWarningSink {
    fn report(&self, warning: PersistenceWarning) {
        tracing::warn!(
            event_name = "store.document.degraded",
            collection = warning.collection,
            op = warning.op.as_str(),
            detail = %warning.detail,
            "document {} failed for `{}` collection",
            warning.op.as_str(),
            warning.collection,
        );
    }
}

/// Capturing sink for tests that assert on the swallowed failures.
#[derive(Debug, Default)]
pub struct RecordingWarningSink {
    warnings: Mutex<Vec<PersistenceWarning>>,
}

impl RecordingWarningSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<PersistenceWarning> {
        match self.warnings.lock() {
            Ok(mut warnings) => warnings.drain(..).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.lock().map(|warnings| warnings.is_empty()).unwrap_or(true)
    }
}

impl WarningSink for RecordingWarningSink {
    fn report(&self, warning: PersistenceWarning) {
        if let Ok(mut warnings) = self.warnings.lock() {
            warnings.push(warning);
        }
    }
}
