use callsnap_types::{Snapshot, parse_collection};
use serde::Serialize;
use std::path::Path;

use crate::Result;

/// Strict read used by inspection APIs. An absent file is an empty collection;
/// anything else that goes wrong is an error.
pub fn load_collection(path: &Path) -> Result<Vec<Snapshot>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(parse_collection(&content)?)
}

/// Lenient read used on the merge path. Unreadable or malformed files are
/// treated as empty and will be overwritten by the next persist.
pub(crate) fn read_collection(path: &Path) -> Vec<Snapshot> {
    match load_collection(path) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Unreadable snapshot store, starting from an empty collection"
            );
            Vec::new()
        }
    }
}

/// Serialize `data` as pretty JSON to `path`, creating parent directories.
/// Failures are logged and dropped.
pub(crate) fn write_json_best_effort<T: Serialize + ?Sized>(path: &Path, data: &T) {
    let content = match serde_json::to_string_pretty(data) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Skipped write: serialization failed");
            return;
        }
    };
    write_text_best_effort(path, &content);
}

/// Write `content` verbatim to `path`, creating parent directories.
/// Failures are logged and dropped.
pub(crate) fn write_text_best_effort(path: &Path, content: &str) {
    let result = path
        .parent()
        .map(std::fs::create_dir_all)
        .unwrap_or(Ok(()))
        .and_then(|_| std::fs::write(path, content));

    if let Err(e) = result {
        tracing::debug!(path = %path.display(), error = %e, "Skipped write: filesystem error");
    }
}
