use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A previously archived invocation output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ArchivedOutput {
    /// Read back from an `.html` artifact.
    Text(String),
    /// Read back from a `.json` artifact.
    Structured(Value),
}

impl ArchivedOutput {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ArchivedOutput::Text(text) => Some(text),
            ArchivedOutput::Structured(_) => None,
        }
    }

    pub fn as_structured(&self) -> Option<&Value> {
        match self {
            ArchivedOutput::Text(_) => None,
            ArchivedOutput::Structured(value) => Some(value),
        }
    }

    /// File extension the artifact was read from.
    pub fn extension(&self) -> &'static str {
        match self {
            ArchivedOutput::Text(_) => "html",
            ArchivedOutput::Structured(_) => "json",
        }
    }
}
