use futures::future::BoxFuture;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Result of invoking a method. Errors are the method's own and propagate to
/// the caller untouched.
pub type CallResult = anyhow::Result<Value>;

/// What a method body hands back: a finished result or a future to await.
pub enum Outcome {
    Ready(CallResult),
    Pending(BoxFuture<'static, CallResult>),
}

impl Outcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, Outcome::Pending(_))
    }

    /// Await the result if pending.
    pub async fn resolve(self) -> CallResult {
        match self {
            Outcome::Ready(result) => result,
            Outcome::Pending(future) => future.await,
        }
    }

    /// Drive a pending result to completion on the current thread.
    pub fn resolve_blocking(self) -> CallResult {
        match self {
            Outcome::Ready(result) => result,
            Outcome::Pending(future) => futures::executor::block_on(future),
        }
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            Outcome::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// How a method was constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Sync,
    Future,
}

type Body = Arc<dyn Fn(Vec<Value>) -> Outcome + Send + Sync>;

/// A callable slot value on a [`Target`](crate::Target).
///
/// Arguments and results are JSON values so that they can be recorded as-is.
/// The optional source text is what source-based classifiers look at.
#[derive(Clone)]
pub struct Method {
    source: Option<String>,
    shape: Shape,
    body: Body,
}

impl Method {
    /// Method that returns its result directly.
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn(Vec<Value>) -> CallResult + Send + Sync + 'static,
    {
        Self {
            source: None,
            shape: Shape::Sync,
            body: Arc::new(move |args| Outcome::Ready(f(args))),
        }
    }

    /// Method that returns a future.
    pub fn future<F, Fut>(f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CallResult> + Send + 'static,
    {
        Self {
            source: None,
            shape: Shape::Future,
            body: Arc::new(move |args| Outcome::Pending(Box::pin(f(args)))),
        }
    }

    /// Method whose body may return either outcome from call to call.
    pub fn from_outcome<F>(shape: Shape, f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Outcome + Send + Sync + 'static,
    {
        Self {
            source: None,
            shape,
            body: Arc::new(f),
        }
    }

    /// Attach the textual source representation.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn invoke(&self, args: Vec<Value>) -> Outcome {
        (self.body)(args)
    }

    /// Same method, same source, different body.
    pub(crate) fn rebody<F>(&self, shape: Shape, f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Outcome + Send + Sync + 'static,
    {
        Self {
            source: self.source.clone(),
            shape,
            body: Arc::new(f),
        }
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("shape", &self.shape)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sync_method_is_ready() {
        let method = Method::sync(|args| Ok(json!(args.len())));
        let outcome = method.invoke(vec![json!(1), json!(2)]);
        assert!(!outcome.is_pending());
        assert_eq!(outcome.resolve_blocking().unwrap(), json!(2));
    }

    #[test]
    fn test_future_method_is_pending() {
        let method = Method::future(|args| async move { Ok::<_, anyhow::Error>(json!(args.len() * 10)) });
        let outcome = method.invoke(vec![json!(1)]);
        assert!(outcome.is_pending());
        assert_eq!(outcome.resolve_blocking().unwrap(), json!(10));
    }

    #[test]
    fn test_source_is_kept() {
        let method = Method::sync(|_| Ok(Value::Null)).with_source("function noop() {}");
        assert_eq!(method.source(), Some("function noop() {}"));
        assert_eq!(method.shape(), Shape::Sync);
        assert!(format!("{:?}", method).contains("noop"));
    }

    #[test]
    fn test_errors_pass_through() {
        let method = Method::sync(|_| Err(anyhow::anyhow!("boom")));
        let err = method.invoke(vec![]).resolve_blocking().unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
