//! Assertions against the on-disk store.
//!
//! Each returns `Err` with a readable message instead of panicking so tests
//! can use `?` and get the context in the failure output.

use anyhow::{Context, Result};
use callsnap_core::layout::with_extension;
use callsnap_types::{ArchivedOutput, Snapshot};

use crate::TestWorld;

/// Assert the history of `target.function` holds exactly `expected` entries.
pub fn assert_history_len(
    world: &TestWorld,
    target: &str,
    function: &str,
    expected: usize,
) -> Result<Vec<Snapshot>> {
    let history = world.history(target, function);
    if history.len() != expected {
        anyhow::bail!(
            "Expected {} history entries for {}.{}, got {}",
            expected,
            target,
            function,
            history.len()
        );
    }
    Ok(history)
}

/// Assert the index has an entry for `target.function` with the given call
/// count.
pub fn assert_index_entry(
    world: &TestWorld,
    target: &str,
    function: &str,
    call_count: u64,
) -> Result<Snapshot> {
    let entry = world
        .index_entry(target, function)
        .with_context(|| format!("No index entry for {}.{}", target, function))?;

    if entry.call_count != call_count {
        anyhow::bail!(
            "Expected call count {} for {}.{}, got {}",
            call_count,
            target,
            function,
            entry.call_count
        );
    }
    Ok(entry)
}

/// Assert the index holds one entry per function identity.
pub fn assert_index_unique(world: &TestWorld) -> Result<()> {
    let index = world.index();
    for (i, entry) in index.iter().enumerate() {
        if index[i + 1..].iter().any(|other| other.same_identity(entry)) {
            anyhow::bail!("Duplicate index entry for {}", entry.identity());
        }
    }
    Ok(())
}

/// Assert an archived output exists at `relative` (no extension) and return
/// it.
pub fn assert_artifact(world: &TestWorld, relative: &str) -> Result<ArchivedOutput> {
    world
        .recorder()
        .read_archived_output(relative)
        .with_context(|| format!("No archived output at {}", relative))
}

/// Assert no archived output exists at `relative` in either format.
pub fn assert_no_artifact(world: &TestWorld, relative: &str) -> Result<()> {
    let base = world.output_path(relative);
    for ext in ["html", "json"] {
        let path = with_extension(base.clone(), ext);
        if path.exists() {
            anyhow::bail!("Unexpected archived output at {}", path.display());
        }
    }
    Ok(())
}
