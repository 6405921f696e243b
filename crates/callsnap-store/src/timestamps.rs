use callsnap_types::Snapshot;
use chrono::{DateTime, Local, TimeZone, Utc};

/// Stamp `snapshot` with the current time. See [`update_timestamps_at`].
pub fn update_timestamps(snapshot: &mut Snapshot) {
    update_timestamps_at(snapshot, Utc::now());
}

/// Stamp `snapshot` as written at `now`.
///
/// A new snapshot gets creation = update = `now`, zero elapsed time and a
/// call count of one. A continuation gets a fresh update time and adds
/// `now - creation_time` to its elapsed time. The delta is anchored on the
/// original creation time, not the previous update, so repeated writes of the
/// same snapshot grow elapsed time faster than wall clock. The call count of a
/// continuation is left alone.
pub fn update_timestamps_at(snapshot: &mut Snapshot, now: DateTime<Utc>) {
    let now_ms = now.timestamp_millis();

    match snapshot.creation_time {
        None => {
            let text = display_time(now_ms);
            snapshot.creation_time = Some(now_ms);
            snapshot.creation_time_string = Some(text.clone());
            snapshot.update_time = Some(now_ms);
            snapshot.update_time_string = Some(text);
            snapshot.elapsed_time = 0;
            snapshot.call_count = 1;
        }
        Some(created) => {
            snapshot.update_time = Some(now_ms);
            snapshot.update_time_string = Some(display_time(now_ms));
            snapshot.elapsed_time = snapshot
                .elapsed_time
                .saturating_add(now_ms.saturating_sub(created));
        }
    }
}

/// Human-readable local time, e.g. `3/14/2025, 9:26:53 AM`.
pub fn display_time(epoch_ms: i64) -> String {
    match Local.timestamp_millis_opt(epoch_ms).single() {
        Some(time) => time.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        None => epoch_ms.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn test_new_snapshot_initialises_counters() {
        let mut snap = Snapshot::template("M", "add");
        snap.elapsed_time = 99;
        snap.call_count = 7;

        update_timestamps_at(&mut snap, at(1_000));

        assert_eq!(snap.creation_time, Some(1_000));
        assert_eq!(snap.update_time, Some(1_000));
        assert_eq!(snap.creation_time_string, snap.update_time_string);
        assert_eq!(snap.elapsed_time, 0);
        assert_eq!(snap.call_count, 1);
        assert!(!snap.is_new());
    }

    #[test]
    fn test_continuation_anchors_on_creation_time() {
        let mut snap = Snapshot::template("M", "add");
        let start = at(1_000);

        update_timestamps_at(&mut snap, start);
        update_timestamps_at(&mut snap, start + Duration::milliseconds(30));
        assert_eq!(snap.elapsed_time, 30);

        // Second continuation measures from creation again: 30 + 50.
        update_timestamps_at(&mut snap, start + Duration::milliseconds(50));
        assert_eq!(snap.elapsed_time, 80);
        assert_eq!(snap.update_time, Some(1_050));
        assert_eq!(snap.creation_time, Some(1_000));
        assert_eq!(snap.call_count, 1);
    }

    #[test]
    fn test_elapsed_time_saturates() {
        let mut snap = Snapshot::template("M", "add");
        snap.creation_time = Some(i64::MIN);
        snap.elapsed_time = i64::MAX - 1;

        update_timestamps_at(&mut snap, at(1_000));
        assert_eq!(snap.elapsed_time, i64::MAX);
    }

    #[test]
    fn test_display_time_shape() {
        let text = display_time(0);
        assert!(text.contains('/'));
        assert!(text.ends_with("AM") || text.ends_with("PM"));
    }
}
