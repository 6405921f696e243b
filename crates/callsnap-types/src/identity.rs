use serde::{Deserialize, Serialize};
use std::fmt;

/// Function identity: the (target name, function name) pair that names one
/// instrumented call site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionIdentity {
    pub target_name: String,
    pub function_name: String,
}

impl FunctionIdentity {
    pub fn new(target_name: impl Into<String>, function_name: impl Into<String>) -> Self {
        Self {
            target_name: target_name.into(),
            function_name: function_name.into(),
        }
    }
}

impl fmt::Display for FunctionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.target_name, self.function_name)
    }
}
