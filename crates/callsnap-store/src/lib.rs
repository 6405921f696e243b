//! Persistence for recorded calls.
//!
//! Two complementary collections are kept for every snapshot:
//! - a bounded history per function identity (`data/<target>/<function>.json`)
//! - a global index holding one aggregated entry per identity (`data/main.json`)
//!
//! Raw outputs are archived separately under `output/`, keyed by run id.
//!
//! Every write here is best-effort: failures are logged and dropped so that
//! recording never changes the control flow of the instrumented code.

pub mod archive;
pub mod error;
pub mod history;
pub mod index;
mod json;
pub mod store;
pub mod timestamps;

pub use archive::{archive_output, read_archived_output};
pub use error::{Error, Result};
pub use history::{HistoryPolicy, merge_into_history};
pub use index::{IndexPolicy, merge_into_index};
pub use json::load_collection;
pub use store::SnapshotStore;
pub use timestamps::{update_timestamps, update_timestamps_at};
