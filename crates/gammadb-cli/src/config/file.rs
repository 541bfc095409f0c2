use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileAlignerConfig {
    pub executable: Option<String>,
    pub fallback_executables: Option<Vec<String>>,
    pub probe_arg: Option<String>,
    pub probe_timeout_secs: Option<u64>,
    pub run_timeout_secs: Option<u64>,
    pub max_output_bytes: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileCacheConfig {
    pub path: Option<PathBuf>,
    pub in_memory: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileStructuresConfig {
    pub root: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileSimulationConfig {
    pub seed: Option<u64>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DatasetBackend {
    Local,
    Remote,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileDatasetConfig {
    pub backend: Option<DatasetBackend>,
    pub path: Option<PathBuf>,
    pub url: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub aligner: Option<FileAlignerConfig>,
    pub cache: Option<FileCacheConfig>,
    pub structures: Option<FileStructuresConfig>,
    pub simulation: Option<FileSimulationConfig>,
    pub dataset: Option<FileDatasetConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
