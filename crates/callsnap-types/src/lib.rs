pub mod error;
pub mod flavor;
pub mod identity;
pub mod output;
pub mod snapshot;

pub use error::{Error, Result};
pub use flavor::Flavor;
pub use identity::FunctionIdentity;
pub use output::ArchivedOutput;
pub use snapshot::{Snapshot, new_snapshot_id, parse_collection};
