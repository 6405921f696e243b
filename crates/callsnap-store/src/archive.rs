use callsnap_core::Layout;
use callsnap_core::layout::with_extension;
use callsnap_types::{ArchivedOutput, Snapshot};
use serde_json::Value;

use crate::json::{write_json_best_effort, write_text_best_effort};

/// Archive the raw output of `snapshot` under the run id.
///
/// String outputs go verbatim to `<target>/<function>/<run_id>.html`; any
/// other shape (including an absent output, written as `null`) goes to
/// `.json`. Never fails.
pub fn archive_output(layout: &Layout, snapshot: &Snapshot, run_id: &str) {
    let identity = snapshot.identity();

    match &snapshot.output {
        Some(Value::String(text)) => {
            let path = layout.text_output_path(&identity, run_id);
            write_text_best_effort(&path, text);
        }
        other => {
            let path = layout.structured_output_path(&identity, run_id);
            write_json_best_effort(&path, &other.clone().unwrap_or(Value::Null));
        }
    }
}

/// Read an archived artifact by path relative to the output directory,
/// without extension (e.g. `"M/add/default"`).
///
/// The text artifact wins when both exist. Returns `None` if neither exists
/// or the structured artifact cannot be parsed.
pub fn read_archived_output(layout: &Layout, relative_path: &str) -> Option<ArchivedOutput> {
    let base = layout.output_relative(relative_path);

    let text_path = with_extension(base.clone(), "html");
    if text_path.exists() {
        return match std::fs::read_to_string(&text_path) {
            Ok(text) => Some(ArchivedOutput::Text(text)),
            Err(e) => {
                tracing::debug!(path = %text_path.display(), error = %e, "Failed to read text artifact");
                None
            }
        };
    }

    let json_path = with_extension(base, "json");
    if json_path.exists() {
        let parsed = std::fs::read_to_string(&json_path)
            .map_err(|e| e.to_string())
            .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()));
        return match parsed {
            Ok(value) => Some(ArchivedOutput::Structured(value)),
            Err(e) => {
                tracing::debug!(path = %json_path.display(), error = %e, "Failed to read structured artifact");
                None
            }
        };
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn with_output(output: Option<Value>) -> Snapshot {
        let mut snap = Snapshot::template("M", "render");
        snap.output = output;
        snap
    }

    #[test]
    fn test_string_output_is_text_artifact() {
        let temp_dir = TempDir::new().unwrap();
        let layout = Layout::new(temp_dir.path());

        archive_output(&layout, &with_output(Some(json!("<p>hi</p>"))), "default");

        let path = temp_dir.path().join("output/M/render/default.html");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<p>hi</p>");
        assert_eq!(
            read_archived_output(&layout, "M/render/default"),
            Some(ArchivedOutput::Text("<p>hi</p>".to_string()))
        );
    }

    #[test]
    fn test_structured_output_is_json_artifact() {
        let temp_dir = TempDir::new().unwrap();
        let layout = Layout::new(temp_dir.path());

        archive_output(&layout, &with_output(Some(json!({ "a": 1 }))), "run123456");

        assert!(!temp_dir.path().join("output/M/render/run123456.html").exists());
        assert_eq!(
            read_archived_output(&layout, "M/render/run123456"),
            Some(ArchivedOutput::Structured(json!({ "a": 1 })))
        );
    }

    #[test]
    fn test_absent_output_is_null() {
        let temp_dir = TempDir::new().unwrap();
        let layout = Layout::new(temp_dir.path());

        archive_output(&layout, &with_output(None), "default");

        assert_eq!(
            read_archived_output(&layout, "M/render/default"),
            Some(ArchivedOutput::Structured(Value::Null))
        );
    }

    #[test]
    fn test_text_wins_over_json() {
        let temp_dir = TempDir::new().unwrap();
        let layout = Layout::new(temp_dir.path());

        archive_output(&layout, &with_output(Some(json!([1, 2]))), "default");
        archive_output(&layout, &with_output(Some(json!("text"))), "default");

        assert_eq!(
            read_archived_output(&layout, "M/render/default"),
            Some(ArchivedOutput::Text("text".to_string()))
        );
    }

    #[test]
    fn test_missing_or_corrupt_artifact_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let layout = Layout::new(temp_dir.path());
        assert_eq!(read_archived_output(&layout, "M/render/default"), None);

        let path = temp_dir.path().join("output/M/render/broken.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{").unwrap();
        assert_eq!(read_archived_output(&layout, "M/render/broken"), None);
    }
}
