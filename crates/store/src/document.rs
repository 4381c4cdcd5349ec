//! Shared load/save helpers for the JSON collection documents.
//!
//! Each document holds one JSON array and is rewritten in full on every
//! mutation. Reads soft-fail: a missing, unreadable, or unparseable document
//! is treated as an empty collection. Writes are not atomic (no
//! temp-file/rename), and a failed write is reported to the warning sink
//! rather than to the caller.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::warnings::{DocumentOp, PersistenceWarning, WarningSink};

pub async fn load_collection<T>(
    path: &Path,
    collection: &'static str,
    warnings: &dyn WarningSink,
) -> Vec<T>
where
    T: DeserializeOwned,
{
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(error) => {
            warnings.report(PersistenceWarning {
                collection,
                op: DocumentOp::Read,
                detail: format!("could not read `{}`: {error}", path.display()),
            });
            return Vec::new();
        }
    };

    match serde_json::from_slice(&raw) {
        Ok(entities) => entities,
        Err(error) => {
            warnings.report(PersistenceWarning {
                collection,
                op: DocumentOp::Read,
                detail: format!("could not parse `{}`: {error}", path.display()),
            });
            Vec::new()
        }
    }
}

pub async fn save_collection<T>(
    path: &Path,
    entities: &[T],
    collection: &'static str,
    warnings: &dyn WarningSink,
) where
    T: Serialize,
{
    let payload = match serde_json::to_string_pretty(entities) {
        Ok(payload) => payload,
        Err(error) => {
            warnings.report(PersistenceWarning {
                collection,
                op: DocumentOp::Write,
                detail: format!("could not serialize `{}`: {error}", path.display()),
            });
            return;
        }
    };

    if let Err(error) = tokio::fs::write(path, payload).await {
        warnings.report(PersistenceWarning {
            collection,
            op: DocumentOp::Write,
            detail: format!("could not write `{}`: {error}", path.display()),
        });
    }
}
