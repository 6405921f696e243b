//! Testing infrastructure for callsnap integration tests.
//!
//! - `TestWorld`: isolated project root with a recorder and CLI runner
//! - `fixtures`: ready-made targets with known behavior
//! - `assertions`: checks against the on-disk store

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use world::{CliResult, TestWorld};
