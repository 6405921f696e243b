use crate::types::OutputFormat;
use anyhow::Result;
use callsnap_core::{Config, Layout, resolve_root};
use callsnap_store::SnapshotStore;
use std::path::{Path, PathBuf};

pub struct ExecutionContext {
    root: PathBuf,
    config_path: PathBuf,
    config: Config,
    pub format: OutputFormat,
}

impl ExecutionContext {
    pub fn new(root: Option<String>, format: OutputFormat) -> Result<Self> {
        let root = resolve_root(root.as_deref())?;
        let config_path = Config::default_path(&root);
        let config = Config::load_from(&config_path)?;

        tracing::debug!(
            root = %root.display(),
            config = %config_path.display(),
            "Resolved project"
        );

        Ok(Self {
            root,
            config_path,
            config,
            format,
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn layout(&self) -> Layout {
        Layout::from_config(&self.root, &self.config)
    }

    pub fn store(&self) -> SnapshotStore {
        SnapshotStore::from_config(self.layout(), &self.config)
    }
}
