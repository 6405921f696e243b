use callsnap_core::HistoryConfig;
use callsnap_types::Snapshot;
use std::path::Path;

use crate::json::{read_collection, write_json_best_effort};

/// Merge rules for a per-function history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryPolicy {
    /// Maximum number of entries kept. Never below one.
    pub cap: usize,
    /// Remove an entry with the same function identity before inserting.
    /// Its elapsed time and call count are discarded, not merged.
    pub supersede_identity: bool,
}

impl Default for HistoryPolicy {
    fn default() -> Self {
        Self::from(&HistoryConfig::default())
    }
}

impl From<&HistoryConfig> for HistoryPolicy {
    fn from(config: &HistoryConfig) -> Self {
        Self {
            cap: config.cap.max(1),
            supersede_identity: config.supersede_identity,
        }
    }
}

/// Merge `snapshot` into the history stored at `path`.
///
/// An entry with the same id is replaced in place; order and cap are left
/// untouched. Otherwise the snapshot is inserted at the front and the oldest
/// entries beyond the cap are evicted. Persisting is best-effort.
pub fn merge_into_history(path: &Path, snapshot: &Snapshot, policy: &HistoryPolicy) {
    let mut entries = read_collection(path);

    if let Some(existing) = entries.iter_mut().find(|e| e.same_id(snapshot)) {
        *existing = snapshot.clone();
        write_json_best_effort(path, &entries);
        return;
    }

    if policy.supersede_identity {
        entries.retain(|e| !e.same_identity(snapshot));
    }

    entries.insert(0, snapshot.clone());
    if entries.len() > policy.cap {
        tracing::trace!(
            path = %path.display(),
            evicted = entries.len() - policy.cap,
            "History cap reached"
        );
        entries.truncate(policy.cap);
    }

    write_json_best_effort(path, &entries);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_collection;
    use tempfile::TempDir;

    fn snap(id: &str) -> Snapshot {
        Snapshot::template("M", "add").with_id(id)
    }

    #[test]
    fn test_insert_goes_to_front() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("M").join("add.json");
        let policy = HistoryPolicy::default();

        merge_into_history(&path, &snap("a"), &policy);
        merge_into_history(&path, &snap("b"), &policy);

        let ids: Vec<_> = load_collection(&path)
            .unwrap()
            .into_iter()
            .filter_map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_id_match_replaces_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("add.json");
        let policy = HistoryPolicy::default();

        merge_into_history(&path, &snap("a"), &policy);
        merge_into_history(&path, &snap("b"), &policy);

        let mut updated = snap("a");
        updated.output = Some(serde_json::json!(5));
        merge_into_history(&path, &updated, &policy);

        let entries = load_collection(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id.as_deref(), Some("b"));
        assert_eq!(entries[1].id.as_deref(), Some("a"));
        assert_eq!(entries[1].output, Some(serde_json::json!(5)));
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("add.json");
        let policy = HistoryPolicy {
            cap: 3,
            supersede_identity: false,
        };

        for id in ["a", "b", "c", "d", "e"] {
            merge_into_history(&path, &snap(id), &policy);
        }

        let ids: Vec<_> = load_collection(&path)
            .unwrap()
            .into_iter()
            .filter_map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["e", "d", "c"]);
    }

    #[test]
    fn test_supersede_identity_discards_previous_counters() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("add.json");
        let policy = HistoryPolicy {
            cap: 10,
            supersede_identity: true,
        };

        let mut first = snap("a");
        first.call_count = 4;
        first.elapsed_time = 40;
        merge_into_history(&path, &first, &policy);

        let mut second = snap("b");
        second.call_count = 1;
        second.elapsed_time = 2;
        merge_into_history(&path, &second, &policy);

        let entries = load_collection(&path).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id.as_deref(), Some("b"));
        assert_eq!(entries[0].call_count, 1);
        assert_eq!(entries[0].elapsed_time, 2);
    }

    #[test]
    fn test_zero_cap_is_clamped() {
        let policy = HistoryPolicy::from(&HistoryConfig {
            cap: 0,
            supersede_identity: false,
        });
        assert_eq!(policy.cap, 1);
    }
}
