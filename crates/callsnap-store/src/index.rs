use callsnap_core::IndexConfig;
use callsnap_types::Snapshot;
use std::path::Path;

use crate::json::{read_collection, write_json_best_effort};

/// Merge rules for the global index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexPolicy {
    /// Optional bound applied after insertion. `None` keeps the index
    /// unbounded: it only grows by one entry per newly seen identity.
    pub cap: Option<usize>,
}

impl From<&IndexConfig> for IndexPolicy {
    fn from(config: &IndexConfig) -> Self {
        Self {
            cap: config.cap.map(|cap| cap.max(1)),
        }
    }
}

/// Merge `snapshot` into the global index stored at `path`.
///
/// An entry with the same id is replaced in place without aggregation.
/// Otherwise any entry with the same function identity is folded into
/// `snapshot` (elapsed time and call count are added to the caller's value)
/// and removed, and `snapshot` is inserted at the front. Persisting is
/// best-effort.
pub fn merge_into_index(path: &Path, snapshot: &mut Snapshot, policy: &IndexPolicy) {
    let mut entries = read_collection(path);

    if let Some(existing) = entries.iter_mut().find(|e| e.same_id(snapshot)) {
        *existing = snapshot.clone();
        write_json_best_effort(path, &entries);
        return;
    }

    entries.retain(|e| {
        if e.same_identity(snapshot) {
            snapshot.elapsed_time = snapshot.elapsed_time.saturating_add(e.elapsed_time);
            snapshot.call_count = snapshot.call_count.saturating_add(e.call_count);
            false
        } else {
            true
        }
    });

    entries.insert(0, snapshot.clone());
    if let Some(cap) = policy.cap
        && entries.len() > cap
    {
        entries.truncate(cap);
    }

    write_json_best_effort(path, &entries);
}
