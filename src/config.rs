use crate::error::ConfigError;
use crate::inspect::DEFAULT_VENDOR_PREFIX;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding [`CatalogConfig::workflows_dir`].
pub const WORKFLOWS_DIR_ENV: &str = "FLOWDEX_WORKFLOWS_DIR";

/// Settings shared by the analyzer and the ingestion coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory holding the canonically named corpus.
    pub workflows_dir: PathBuf,
    /// Source file extensions accepted for ingestion, without the dot.
    pub extensions: Vec<String>,
    /// Node-type namespace whose nodes are classified as integrations.
    pub vendor_prefix: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            workflows_dir: PathBuf::from("workflows"),
            extensions: vec!["json".to_string()],
            vendor_prefix: DEFAULT_VENDOR_PREFIX.to_string(),
        }
    }
}

impl CatalogConfig {
    pub fn new(workflows_dir: impl Into<PathBuf>) -> Self {
        Self {
            workflows_dir: workflows_dir.into(),
            ..Self::default()
        }
    }

    /// Loads a config from a JSON file. Keys left out keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Invalid {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Applies `FLOWDEX_WORKFLOWS_DIR` when it is set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(dir) = std::env::var_os(WORKFLOWS_DIR_ENV).filter(|v| !v.is_empty()) {
            self.workflows_dir = PathBuf::from(dir);
        }
        self
    }

    pub fn with_workflows_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workflows_dir = dir.into();
        self
    }

    /// Case-insensitive check against the accepted extensions.
    pub fn accepts_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}
