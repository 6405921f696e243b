use callsnap_core::{Config, HistoryConfig, Layout};
use callsnap_store::*;
use callsnap_types::{Snapshot, new_snapshot_id};
use chrono::{Duration, TimeZone, Utc};
use tempfile::TempDir;

#[test]
fn test_history_never_exceeds_cap_over_fifteen_calls() {
    let temp_dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(Layout::new(temp_dir.path()));
    let identity = Snapshot::template("M", "add").identity();

    for _ in 0..15 {
        let mut snap = Snapshot::template("M", "add").with_id(new_snapshot_id());
        store.save(&mut snap);
        store.save(&mut snap);
        assert!(store.history(&identity).unwrap().len() <= 10);
    }

    assert_eq!(store.history(&identity).unwrap().len(), 10);
}

#[test]
fn test_index_aggregates_elapsed_and_calls() {
    let temp_dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(Layout::new(temp_dir.path()));
    let t0 = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();

    // First invocation: observed at t0, completed 20ms later.
    let mut first = Snapshot::template("M", "add").with_id("first");
    store.save_at(&mut first, t0);
    store.save_at(&mut first, t0 + Duration::milliseconds(20));
    let first_elapsed = store.index().unwrap()[0].elapsed_time;
    assert_eq!(first_elapsed, 20);

    // Second invocation starts from a clean template.
    let t1 = t0 + Duration::milliseconds(100);
    let mut second = Snapshot::template("M", "add").with_id("second");
    store.save_at(&mut second, t1);
    store.save_at(&mut second, t1 + Duration::milliseconds(7));

    let index = store.index().unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index[0].id.as_deref(), Some("second"));
    assert_eq!(index[0].call_count, 2);
    assert_eq!(index[0].elapsed_time, first_elapsed + 7);
}

#[test]
fn test_malformed_index_is_rebuilt_on_next_save() {
    let temp_dir = TempDir::new().unwrap();
    let layout = Layout::new(temp_dir.path());
    std::fs::create_dir_all(layout.data_dir()).unwrap();
    std::fs::write(layout.index_path(), "[{ broken").unwrap();

    let store = SnapshotStore::new(layout);
    assert!(store.index().is_err());

    store.save(&mut Snapshot::template("M", "add").with_id("a"));
    let index = store.index().unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index[0].call_count, 1);
}

#[test]
fn test_store_from_config_applies_policies() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        data_dir: "snaps".into(),
        history: HistoryConfig {
            cap: 2,
            supersede_identity: false,
        },
        ..Default::default()
    };
    let store = SnapshotStore::from_config(Layout::from_config(temp_dir.path(), &config), &config);

    for id in ["a", "b", "c"] {
        store.save(&mut Snapshot::template("M", "add").with_id(id));
    }

    let history_path = temp_dir.path().join("snaps/M/add.json");
    assert_eq!(load_collection(&history_path).unwrap().len(), 2);
}
