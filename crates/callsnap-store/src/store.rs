use callsnap_core::{Config, Layout};
use callsnap_types::{ArchivedOutput, FunctionIdentity, Snapshot};
use chrono::{DateTime, Utc};
use walkdir::WalkDir;

use crate::{
    HistoryPolicy, IndexPolicy, Result, archive, history::merge_into_history,
    index::merge_into_index, json::load_collection, timestamps::update_timestamps_at,
};

/// Both snapshot collections plus the output archive, bound to one layout.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    layout: Layout,
    history: HistoryPolicy,
    index: IndexPolicy,
}

impl SnapshotStore {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            history: HistoryPolicy::default(),
            index: IndexPolicy::default(),
        }
    }

    pub fn from_config(layout: Layout, config: &Config) -> Self {
        Self {
            layout,
            history: HistoryPolicy::from(&config.history),
            index: IndexPolicy::from(&config.index),
        }
    }

    pub fn with_history_policy(mut self, policy: HistoryPolicy) -> Self {
        self.history = policy;
        self
    }

    pub fn with_index_policy(mut self, policy: IndexPolicy) -> Self {
        self.index = policy;
        self
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn history_policy(&self) -> &HistoryPolicy {
        &self.history
    }

    pub fn index_policy(&self) -> &IndexPolicy {
        &self.index
    }

    /// Stamp `snapshot` and merge it into its history and the global index.
    pub fn save(&self, snapshot: &mut Snapshot) {
        self.save_at(snapshot, Utc::now());
    }

    /// [`save`](Self::save) with an explicit clock.
    ///
    /// The history receives the snapshot before index aggregation folds
    /// earlier counters into it.
    pub fn save_at(&self, snapshot: &mut Snapshot, now: DateTime<Utc>) {
        update_timestamps_at(snapshot, now);

        let history_path = self.layout.history_path(&snapshot.identity());
        merge_into_history(&history_path, snapshot, &self.history);
        merge_into_index(&self.layout.index_path(), snapshot, &self.index);
    }

    pub fn archive(&self, snapshot: &Snapshot, run_id: &str) {
        archive::archive_output(&self.layout, snapshot, run_id);
    }

    pub fn read_archived_output(&self, relative_path: &str) -> Option<ArchivedOutput> {
        archive::read_archived_output(&self.layout, relative_path)
    }

    /// Delete the global index. A missing file is not an error.
    pub fn reset(&self) -> Result<()> {
        let path = self.layout.index_path();
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Removed global index");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Current global index, most recently touched first.
    pub fn index(&self) -> Result<Vec<Snapshot>> {
        load_collection(&self.layout.index_path())
    }

    /// Current history for one identity, most recently touched first.
    pub fn history(&self, identity: &FunctionIdentity) -> Result<Vec<Snapshot>> {
        load_collection(&self.layout.history_path(identity))
    }

    /// Every identity that has a history file, sorted.
    pub fn identities(&self) -> Result<Vec<FunctionIdentity>> {
        let data_dir = self.layout.data_dir();
        if !data_dir.exists() {
            return Ok(Vec::new());
        }

        let mut identities = Vec::new();
        for entry in WalkDir::new(data_dir).min_depth(2).max_depth(2) {
            let entry = entry.map_err(|e| {
                std::io::Error::other(format!("Failed to walk {}: {}", data_dir.display(), e))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(identity) = self.layout.identity_for_history(entry.path()) {
                identities.push(identity);
            }
        }

        identities.sort();
        Ok(identities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    #[test]
    fn test_save_writes_both_collections() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(Layout::new(temp_dir.path()));

        let mut snap = Snapshot::template("M", "add").with_id("a");
        store.save(&mut snap);

        assert_eq!(store.history(&snap.identity()).unwrap().len(), 1);
        assert_eq!(store.index().unwrap().len(), 1);
        assert_eq!(snap.call_count, 1);
    }

    #[test]
    fn test_history_sees_snapshot_before_index_aggregation() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(Layout::new(temp_dir.path()));
        let t0 = Utc.timestamp_millis_opt(10_000).unwrap();

        let mut first = Snapshot::template("M", "add").with_id("a");
        store.save_at(&mut first, t0);

        let mut second = Snapshot::template("M", "add").with_id("b");
        store.save_at(&mut second, t0 + Duration::milliseconds(5));

        let history = store.history(&second.identity()).unwrap();
        assert_eq!(history[0].id.as_deref(), Some("b"));
        assert_eq!(history[0].call_count, 1);

        let index = store.index().unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index[0].call_count, 2);
        assert_eq!(second.call_count, 2);
    }

    #[test]
    fn test_reset_ignores_missing_index() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(Layout::new(temp_dir.path()));
        store.reset().unwrap();

        let mut snap = Snapshot::template("M", "add").with_id("a");
        store.save(&mut snap);
        assert!(store.layout().index_path().exists());

        store.reset().unwrap();
        assert!(!store.layout().index_path().exists());
        // History is untouched by reset.
        assert_eq!(store.history(&snap.identity()).unwrap().len(), 1);
    }

    #[test]
    fn test_identities_lists_history_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(Layout::new(temp_dir.path()));

        store.save(&mut Snapshot::template("N", "render").with_id("1"));
        store.save(&mut Snapshot::template("M", "add").with_id("2"));
        store.save(&mut Snapshot::template("M", "sub").with_id("3"));

        let ids: Vec<String> = store
            .identities()
            .unwrap()
            .iter()
            .map(|i| i.to_string())
            .collect();
        assert_eq!(ids, vec!["M.add", "M.sub", "N.render"]);
    }

    #[test]
    fn test_identities_empty_without_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(Layout::new(temp_dir.path().join("nowhere")));
        assert!(store.identities().unwrap().is_empty());
    }
}
