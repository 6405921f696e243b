use serde::{Deserialize, Serialize};

/// Verdict of a classifier about how a callable must be invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flavor {
    /// Invoke directly and use the returned value.
    Sync,
    /// Invoke through the awaiting path.
    Async,
    /// The strategy could not decide. Callers fall back to the direct path.
    Unknown,
}

impl Flavor {
    pub fn is_async(self) -> bool {
        matches!(self, Flavor::Async)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Flavor::Sync => "sync",
            Flavor::Async => "async",
            Flavor::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Flavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
