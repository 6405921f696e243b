//! `callsnap` inspects what instrumented runs recorded under a project root:
//! the global index, per-function histories and archived outputs.

mod args;
mod commands;
mod context;
mod handlers;
mod logging;
mod output;
pub mod types;

pub use args::{Cli, Commands, ConfigCommand};
pub use commands::run;
