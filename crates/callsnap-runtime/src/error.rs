use std::fmt;

/// Result type for callsnap-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types raised while opening a recorder or installing wrappers.
///
/// Failures of the instrumented method itself travel as `anyhow::Error`
/// through [`CallResult`](crate::CallResult) and are never wrapped here.
#[derive(Debug)]
pub enum Error {
    /// Store layer error
    Store(callsnap_store::Error),

    /// Configuration or layout error
    Core(callsnap_core::Error),

    /// The target has no method with this name
    MethodNotFound { target: String, function: String },

    /// A lock guarding recorder state was poisoned
    Poisoned(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Store(err) => write!(f, "Store error: {}", err),
            Error::Core(err) => write!(f, "{}", err),
            Error::MethodNotFound { target, function } => {
                write!(f, "Method not found: {}.{}", target, function)
            }
            Error::Poisoned(what) => write!(f, "Lock poisoned: {}", what),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Store(err) => Some(err),
            Error::Core(err) => Some(err),
            Error::MethodNotFound { .. } | Error::Poisoned(_) => None,
        }
    }
}

impl From<callsnap_store::Error> for Error {
    fn from(err: callsnap_store::Error) -> Self {
        Error::Store(err)
    }
}

impl From<callsnap_core::Error> for Error {
    fn from(err: callsnap_core::Error) -> Self {
        Error::Core(err)
    }
}
