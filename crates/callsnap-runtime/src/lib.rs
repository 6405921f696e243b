//! Call interception.
//!
//! A [`Recorder`] wraps a named method on a [`Target`] exactly once. Every
//! later call through the target records a snapshot before and after the
//! original method runs, and archives the raw output.
//!
//! ```no_run
//! use callsnap_runtime::{Method, Recorder, Target};
//! use callsnap_types::Snapshot;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let recorder = Recorder::open(None)?;
//! recorder.reset()?;
//!
//! let math = Target::new("M").with_method(
//!     "add",
//!     Method::sync(|args| Ok(json!(args[0].as_i64().unwrap_or(0) + args[1].as_i64().unwrap_or(0))))
//!         .with_source("(a, b) => a + b"),
//! );
//! recorder.instrument(&math, Snapshot::template("M", "add"));
//!
//! let sum = math.call("add", vec![json!(2), json!(3)])?;
//! assert_eq!(sum, json!(5));
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod error;
pub mod interceptor;
pub mod method;
pub mod target;
mod wrapper;

pub use classifier::{Classifier, DeclaredShape, SourceHeuristic, classifier_for, is_asynchronous};
pub use error::{Error, Result};
pub use interceptor::Recorder;
pub use method::{CallResult, Method, Outcome, Shape};
pub use target::{Target, TargetId};
pub use wrapper::{Phase, PhaseObserver};
