pub mod artifact;
pub mod config;
pub mod history;
pub mod index;
pub mod reset;
pub mod run_id;
pub mod targets;
