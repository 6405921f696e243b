use std::fmt;

/// Result type for callsnap-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types surfaced by explicit store reads and resets.
///
/// Merges and archiving never return these; their failures are swallowed.
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// Stored snapshot collection could not be decoded
    Snapshot(callsnap_types::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Snapshot(err) => write!(f, "Snapshot data error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Snapshot(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<callsnap_types::Error> for Error {
    fn from(err: callsnap_types::Error) -> Self {
        Error::Snapshot(err)
    }
}
