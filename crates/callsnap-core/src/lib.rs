pub mod config;
pub mod error;
pub mod layout;
pub mod path;
pub mod run_id;

pub use config::{ClassifierConfig, ClassifierStrategy, Config, HistoryConfig, IndexConfig};
pub use error::{Error, Result};
pub use layout::Layout;
pub use path::{expand_tilde, resolve_root};
pub use run_id::{DEFAULT_RUN_ID, resolve_run_id, run_id_from_args};
