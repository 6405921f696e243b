use crate::{Error, Result};
use std::path::PathBuf;

/// Resolve the project root that `data/` and `output/` live under:
/// 1. Explicit path (with tilde expansion)
/// 2. CALLSNAP_ROOT environment variable (with tilde expansion)
/// 3. Current working directory
pub fn resolve_root(explicit_path: Option<&str>) -> Result<PathBuf> {
    // Priority 1: Explicit path
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    // Priority 2: CALLSNAP_ROOT environment variable
    if let Ok(env_path) = std::env::var("CALLSNAP_ROOT") {
        return Ok(expand_tilde(&env_path));
    }

    // Priority 3: Current working directory
    std::env::current_dir().map_err(|e| {
        Error::Config(format!(
            "Could not determine project root: no CALLSNAP_ROOT and no current directory ({})",
            e
        ))
    })
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}
