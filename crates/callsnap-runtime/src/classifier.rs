//! Strategies for deciding whether a method must be awaited.
//!
//! The recorder classifies a method once, when the wrapper is installed, and
//! picks the awaiting or direct wrapper from the verdict. An `Unknown` verdict
//! falls back to the direct wrapper.

use callsnap_core::ClassifierStrategy;
use callsnap_types::Flavor;
use regex::Regex;
use std::sync::{Arc, LazyLock};

use crate::{Method, Shape};

static COMPILED_ASYNC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"return _ref[^.]*.apply").unwrap());

pub trait Classifier: Send + Sync {
    fn name(&self) -> &'static str;

    fn classify(&self, method: &Method) -> Flavor;
}

/// Pattern match on the method's recorded source text.
///
/// This is a heuristic: text emitted by an unrecognised toolchain can be
/// misclassified. A method without source text is `Unknown`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceHeuristic;

impl Classifier for SourceHeuristic {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn classify(&self, method: &Method) -> Flavor {
        match method.source() {
            Some(text) if is_asynchronous(text) => Flavor::Async,
            Some(_) => Flavor::Sync,
            None => Flavor::Unknown,
        }
    }
}

/// Trust the shape the method was built with.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredShape;

impl Classifier for DeclaredShape {
    fn name(&self) -> &'static str {
        "declared"
    }

    fn classify(&self, method: &Method) -> Flavor {
        match method.shape() {
            Shape::Sync => Flavor::Sync,
            Shape::Future => Flavor::Async,
        }
    }
}

/// True if the source text looks like an asynchronous function.
pub fn is_asynchronous(source: &str) -> bool {
    let text = source.trim().to_lowercase();

    text.contains("await")
        || text.contains("async")
        // generator transform
        || text.contains("__generator")
        // native
        || text.starts_with("async ")
        // transpiled async wrapper
        || COMPILED_ASYNC_REGEX.is_match(&text)
}

pub fn classifier_for(strategy: ClassifierStrategy) -> Arc<dyn Classifier> {
    match strategy {
        ClassifierStrategy::Heuristic => Arc::new(SourceHeuristic),
        ClassifierStrategy::Declared => Arc::new(DeclaredShape),
    }
}
