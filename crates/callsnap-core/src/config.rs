use crate::{Result, run_id};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "callsnap.toml";
pub const DEFAULT_HISTORY_CAP: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum entries kept per function history.
    #[serde(default = "default_history_cap")]
    pub cap: usize,

    /// Drop an existing entry of the same function identity before inserting.
    #[serde(default)]
    pub supersede_identity: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            cap: DEFAULT_HISTORY_CAP,
            supersede_identity: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Optional eviction bound for the global index. Unbounded when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cap: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierStrategy {
    /// Pattern match on the method's recorded source text.
    #[default]
    Heuristic,
    /// Trust the shape the method was constructed with.
    Declared,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default)]
    pub strategy: ClassifierStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Fixed run id. Takes precedence over CALLSNAP_RUN_ID and the process
    /// arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub index: IndexConfig,

    #[serde(default)]
    pub classifier: ClassifierConfig,
}

fn default_history_cap() -> usize {
    DEFAULT_HISTORY_CAP
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            output_dir: default_output_dir(),
            run_id: None,
            history: HistoryConfig::default(),
            index: IndexConfig::default(),
            classifier: ClassifierConfig::default(),
        }
    }
}

impl Config {
    /// Load the configuration for a project root. A missing file yields the
    /// defaults.
    pub fn load(root: &Path) -> Result<Self> {
        Self::load_from(&Self::default_path(root))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// CALLSNAP_CONFIG if set, otherwise `<root>/callsnap.toml`.
    pub fn default_path(root: &Path) -> PathBuf {
        if let Ok(env_path) = std::env::var("CALLSNAP_CONFIG") {
            return crate::expand_tilde(&env_path);
        }
        root.join(CONFIG_FILE)
    }

    /// Run id used to namespace archived outputs:
    /// 1. `run_id` from this configuration
    /// 2. CALLSNAP_RUN_ID environment variable
    /// 3. First long alphanumeric token in the process arguments
    pub fn effective_run_id(&self) -> String {
        self.pinned_run_id().unwrap_or_else(run_id::resolve_run_id)
    }

    /// [`effective_run_id`](Self::effective_run_id) against an explicit
    /// argument list instead of the current process.
    pub fn run_id_for_args<S: AsRef<str>>(&self, args: &[S]) -> String {
        self.pinned_run_id().unwrap_or_else(|| run_id::run_id_from_args(args))
    }

    fn pinned_run_id(&self) -> Option<String> {
        if let Some(id) = &self.run_id {
            return Some(id.clone());
        }

        std::env::var("CALLSNAP_RUN_ID")
            .ok()
            .filter(|id| !id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.history.cap, 10);
        assert!(!config.history.supersede_identity);
        assert_eq!(config.index.cap, None);
        assert_eq!(config.classifier.strategy, ClassifierStrategy::Heuristic);
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("callsnap.toml");

        let config = Config {
            run_id: Some("fixedrun01".to_string()),
            history: HistoryConfig {
                cap: 3,
                supersede_identity: true,
            },
            index: IndexConfig { cap: Some(50) },
            classifier: ClassifierConfig {
                strategy: ClassifierStrategy::Declared,
            },
            ..Default::default()
        };

        config.save_to(&config_path)?;
        assert!(config_path.exists());

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);

        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("callsnap.toml");
        std::fs::write(&config_path, "[history]\ncap = 4\n")?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded.history.cap, 4);
        assert!(!loaded.history.supersede_identity);
        assert_eq!(loaded.data_dir, PathBuf::from("data"));

        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path)?;
        assert_eq!(config, Config::default());

        Ok(())
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("callsnap.toml");
        std::fs::write(&config_path, "history = [not valid").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_configured_run_id_wins() {
        let config = Config {
            run_id: Some("pinnedrun".to_string()),
            ..Default::default()
        };
        assert_eq!(config.effective_run_id(), "pinnedrun");
        assert_eq!(config.run_id_for_args(&["abcdefghijk"]), "pinnedrun");
    }
}
