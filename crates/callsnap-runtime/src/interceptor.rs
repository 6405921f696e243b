use callsnap_core::{Config, Layout, resolve_root};
use callsnap_store::SnapshotStore;
use callsnap_types::{ArchivedOutput, Flavor, Snapshot};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use crate::classifier::{Classifier, classifier_for};
use crate::wrapper::{Recording, awaiting_wrapper, direct_wrapper};
use crate::{Error, Method, PhaseObserver, Result, Target, TargetId};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct WrapKey {
    target: TargetId,
    function: String,
}

impl WrapKey {
    fn new(target: &Target, function: &str) -> Self {
        Self {
            target: target.id(),
            function: function.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct WrapEntry {
    original: Method,
    flavor: Flavor,
}

/// Installs recording wrappers and owns the wrap table.
///
/// The wrap table maps (target identity, function name) to the original
/// method. A key's presence is the "already wrapped" marker, so instrumenting
/// the same slot twice installs one wrapper.
pub struct Recorder {
    ctx: Arc<Recording>,
    classifier: Arc<dyn Classifier>,
    wrapped: Mutex<HashMap<WrapKey, WrapEntry>>,
}

impl Recorder {
    /// Recorder with default policies writing under `layout`.
    pub fn new(layout: Layout) -> Self {
        Self::with_store(SnapshotStore::new(layout), &Config::default())
    }

    /// Recorder configured from `config`, with directories resolved against
    /// `root`.
    pub fn from_config(root: &Path, config: &Config) -> Self {
        let layout = Layout::from_config(root, config);
        Self::with_store(SnapshotStore::from_config(layout, config), config)
    }

    /// Resolve the project root, load its configuration and build a recorder.
    pub fn open(explicit_root: Option<&str>) -> Result<Self> {
        let root = resolve_root(explicit_root)?;
        let config = Config::load(&root)?;
        Ok(Self::from_config(&root, &config))
    }

    fn with_store(store: SnapshotStore, config: &Config) -> Self {
        Self {
            ctx: Arc::new(Recording {
                store,
                run_id: config.effective_run_id(),
                observer: None,
            }),
            classifier: classifier_for(config.classifier.strategy),
            wrapped: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the classification strategy. Affects later installs only.
    pub fn with_classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Pin the run id used for archived outputs. Affects later installs only.
    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.ctx).run_id = run_id.into();
        self
    }

    /// Observe call lifecycles. Affects later installs only.
    pub fn with_observer(mut self, observer: Arc<dyn PhaseObserver>) -> Self {
        Arc::make_mut(&mut self.ctx).observer = Some(observer);
        self
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.ctx.store
    }

    pub fn run_id(&self) -> &str {
        &self.ctx.run_id
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    /// Start recording `template.function_name` on `target`.
    ///
    /// Returns `true` when a wrapper was installed by this call. Returns
    /// `false` if the slot is already wrapped or installation failed; failures
    /// are logged and leave the target untouched.
    pub fn instrument(&self, target: &Target, template: Snapshot) -> bool {
        let function = template.function_name.clone();
        match self.try_instrument(target, template) {
            Ok(installed) => installed,
            Err(e) => {
                tracing::warn!(
                    target_name = %target.name(),
                    function_name = %function,
                    error = %e,
                    "Failed to install recording wrapper"
                );
                false
            }
        }
    }

    fn try_instrument(&self, target: &Target, mut template: Snapshot) -> Result<bool> {
        if template.target_name.is_empty() {
            template.target_name = target.name().to_string();
        }

        let key = WrapKey::new(target, &template.function_name);
        let mut wrapped = self
            .wrapped
            .lock()
            .map_err(|_| Error::Poisoned("wrap table"))?;

        if wrapped.contains_key(&key) {
            tracing::debug!(
                target_name = %target.name(),
                function_name = %template.function_name,
                "Already instrumented"
            );
            return Ok(false);
        }

        let original = target.method(&template.function_name).ok_or_else(|| {
            Error::MethodNotFound {
                target: target.name().to_string(),
                function: template.function_name.clone(),
            }
        })?;

        let flavor = self.classifier.classify(&original);
        let ctx = self.ctx.clone();
        let wrapper = match flavor {
            Flavor::Async => awaiting_wrapper(ctx, template.clone(), original.clone()),
            Flavor::Sync => direct_wrapper(ctx, template.clone(), original.clone()),
            Flavor::Unknown => {
                tracing::warn!(
                    target_name = %template.target_name,
                    function_name = %template.function_name,
                    classifier = self.classifier.name(),
                    "Could not classify method, using the direct wrapper"
                );
                direct_wrapper(ctx, template.clone(), original.clone())
            }
        };

        wrapped.insert(key, WrapEntry { original, flavor });
        target.replace(&template.function_name, wrapper);

        tracing::info!(
            target_name = %template.target_name,
            function_name = %template.function_name,
            %flavor,
            "Instrumented"
        );
        Ok(true)
    }

    pub fn is_instrumented(&self, target: &Target, function: &str) -> bool {
        self.lock_wrapped().contains_key(&WrapKey::new(target, function))
    }

    /// Verdict the wrapper for this slot was chosen with.
    pub fn flavor_of(&self, target: &Target, function: &str) -> Option<Flavor> {
        self.lock_wrapped()
            .get(&WrapKey::new(target, function))
            .map(|entry| entry.flavor)
    }

    /// The unwrapped method, for calls that must bypass recording.
    pub fn original(&self, target: &Target, function: &str) -> Option<Method> {
        self.lock_wrapped()
            .get(&WrapKey::new(target, function))
            .map(|entry| entry.original.clone())
    }

    pub fn instrumented_count(&self) -> usize {
        self.lock_wrapped().len()
    }

    /// Put the original method back and forget the wrapper. Returns `false`
    /// if the slot was not instrumented by this recorder.
    pub fn restore(&self, target: &Target, function: &str) -> bool {
        let entry = self.lock_wrapped().remove(&WrapKey::new(target, function));
        match entry {
            Some(entry) => {
                target.replace(function, entry.original);
                true
            }
            None => false,
        }
    }

    /// Delete the global index. Meant to run once at the start of a
    /// recording session.
    pub fn reset(&self) -> Result<()> {
        Ok(self.ctx.store.reset()?)
    }

    /// Read an archived output by path relative to the output directory,
    /// without extension (e.g. `"M/add/default"`).
    pub fn read_archived_output(&self, relative_path: &str) -> Option<ArchivedOutput> {
        self.ctx.store.read_archived_output(relative_path)
    }

    fn lock_wrapped(&self) -> std::sync::MutexGuard<'_, HashMap<WrapKey, WrapEntry>> {
        self.wrapped.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Recorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recorder")
            .field("layout", self.ctx.store.layout())
            .field("run_id", &self.ctx.run_id)
            .field("classifier", &self.classifier.name())
            .field("instrumented", &self.instrumented_count())
            .finish()
    }
}
