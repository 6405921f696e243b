use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::FunctionIdentity;

/// Recorded state of one function invocation.
///
/// The same record is written at least twice per call: once when the call is
/// observed and once when it completes. Field names are persisted in camelCase
/// so existing `data/` trees stay readable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Random per-invocation identifier. Unset on a template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub target_name: String,

    #[serde(default)]
    pub function_name: String,

    /// Reserved linkage to a function record. Never populated by the recorder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_id: Option<String>,

    /// Reserved linkage to a parent invocation. Never populated by the recorder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller_id: Option<String>,

    #[serde(default)]
    pub input: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,

    /// Epoch milliseconds of the first write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time_string: Option<String>,

    /// Epoch milliseconds of the latest write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time_string: Option<String>,

    /// Accumulated milliseconds, summed across merges.
    #[serde(default)]
    pub elapsed_time: i64,

    /// Accumulated call count, summed across index merges.
    #[serde(default, rename = "numberOfCall")]
    pub call_count: u64,

    /// Nested mock snapshots, reserved for composition.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mocks: Vec<Snapshot>,
}

impl Snapshot {
    /// Template naming a function on a target. Everything else is filled in
    /// per call.
    pub fn template(target_name: impl Into<String>, function_name: impl Into<String>) -> Self {
        Self {
            target_name: target_name.into(),
            function_name: function_name.into(),
            ..Default::default()
        }
    }

    pub fn identity(&self) -> FunctionIdentity {
        FunctionIdentity::new(&self.target_name, &self.function_name)
    }

    pub fn has_identity(&self, identity: &FunctionIdentity) -> bool {
        self.target_name == identity.target_name && self.function_name == identity.function_name
    }

    pub fn same_identity(&self, other: &Snapshot) -> bool {
        self.target_name == other.target_name && self.function_name == other.function_name
    }

    /// Identifier match. Two snapshots without an id never match.
    pub fn same_id(&self, other: &Snapshot) -> bool {
        matches!((&self.id, &other.id), (Some(a), Some(b)) if a == b)
    }

    /// A snapshot that has never been timestamped.
    pub fn is_new(&self) -> bool {
        self.creation_time.is_none()
    }

    /// True once an output has been attached by a completion write.
    pub fn is_completed(&self) -> bool {
        self.output.is_some()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_input(mut self, input: Vec<Value>) -> Self {
        self.input = input;
        self
    }
}

/// Fresh random invocation identifier.
pub fn new_snapshot_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Decode a persisted snapshot collection.
pub fn parse_collection(content: &str) -> crate::Result<Vec<Snapshot>> {
    Ok(serde_json::from_str(content)?)
}
