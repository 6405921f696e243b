use callsnap_types::FunctionIdentity;
use std::path::{Path, PathBuf};

use crate::Config;

const INDEX_FILE: &str = "main.json";

/// Where snapshot stores and archived outputs live on disk.
///
/// ```text
/// <data_dir>/main.json                          global index
/// <data_dir>/<target>/<function>.json           per-function history
/// <output_dir>/<target>/<function>/<run>.html   string output
/// <output_dir>/<target>/<function>/<run>.json   structured output
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    data_dir: PathBuf,
    output_dir: PathBuf,
}

impl Layout {
    /// Default layout under `root`: `root/data` and `root/output`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            data_dir: root.join("data"),
            output_dir: root.join("output"),
        }
    }

    /// Layout with directories taken from `config`. Relative directories are
    /// resolved against `root`.
    pub fn from_config(root: impl AsRef<Path>, config: &Config) -> Self {
        let root = root.as_ref();
        Self {
            data_dir: root.join(&config.data_dir),
            output_dir: root.join(&config.output_dir),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn index_path(&self) -> PathBuf {
        self.data_dir.join(INDEX_FILE)
    }

    pub fn history_path(&self, identity: &FunctionIdentity) -> PathBuf {
        self.data_dir
            .join(&identity.target_name)
            .join(format!("{}.json", identity.function_name))
    }

    /// Artifact path without extension.
    pub fn output_base(&self, identity: &FunctionIdentity, run_id: &str) -> PathBuf {
        self.output_dir
            .join(&identity.target_name)
            .join(&identity.function_name)
            .join(run_id)
    }

    pub fn text_output_path(&self, identity: &FunctionIdentity, run_id: &str) -> PathBuf {
        with_extension(self.output_base(identity, run_id), "html")
    }

    pub fn structured_output_path(&self, identity: &FunctionIdentity, run_id: &str) -> PathBuf {
        with_extension(self.output_base(identity, run_id), "json")
    }

    /// Resolve a consumer-supplied path relative to the output directory.
    pub fn output_relative(&self, relative: &str) -> PathBuf {
        self.output_dir.join(relative)
    }

    /// Identity for a history file under `data_dir`, if the path has the
    /// `<target>/<function>.json` shape.
    pub fn identity_for_history(&self, path: &Path) -> Option<FunctionIdentity> {
        let relative = path.strip_prefix(&self.data_dir).ok()?;
        let mut components = relative.components();
        let target = components.next()?.as_os_str().to_str()?;
        let file = components.next()?.as_os_str().to_str()?;
        if components.next().is_some() {
            return None;
        }
        let function = file.strip_suffix(".json")?;
        Some(FunctionIdentity::new(target, function))
    }
}

/// Append an extension without replacing dots already in the file name.
///
/// Run ids and function names may contain dots, so `Path::with_extension`
/// would truncate them.
pub fn with_extension(base: PathBuf, ext: &str) -> PathBuf {
    let mut os = base.into_os_string();
    os.push(".");
    os.push(ext);
    PathBuf::from(os)
}
