use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::{CallResult, Error, Method};

static NEXT_TARGET_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`Target`], independent of its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(u64);

/// A named object whose methods can be swapped at run time.
///
/// Calls always go through the slot table, so a wrapper installed by a
/// recorder is picked up by every later call.
pub struct Target {
    id: TargetId,
    name: String,
    methods: RwLock<HashMap<String, Method>>,
}

impl Target {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TargetId(NEXT_TARGET_ID.fetch_add(1, Ordering::Relaxed)),
            name: name.into(),
            methods: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_method(self, name: impl Into<String>, method: Method) -> Self {
        self.define(name, method);
        self
    }

    pub fn id(&self) -> TargetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Define or overwrite a method slot.
    pub fn define(&self, name: impl Into<String>, method: Method) {
        self.methods
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), method);
    }

    /// Current slot value.
    pub fn method(&self, name: &str) -> Option<Method> {
        self.methods
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn method_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .methods
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Swap a slot, returning the previous value.
    pub(crate) fn replace(&self, name: &str, method: Method) -> Option<Method> {
        self.methods
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), method)
    }

    /// Call a method and wait for its result on the current thread.
    pub fn call(&self, name: &str, args: Vec<Value>) -> CallResult {
        let method = self.lookup(name)?;
        method.invoke(args).resolve_blocking()
    }

    /// Call a method and await its result.
    pub async fn call_async(&self, name: &str, args: Vec<Value>) -> CallResult {
        let method = self.lookup(name)?;
        method.invoke(args).resolve().await
    }

    fn lookup(&self, name: &str) -> anyhow::Result<Method> {
        self.method(name).ok_or_else(|| {
            anyhow::Error::new(Error::MethodNotFound {
                target: self.name.clone(),
                function: name.to_string(),
            })
        })
    }
}

impl std::fmt::Debug for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Target")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("methods", &self.method_names())
            .finish()
    }
}
