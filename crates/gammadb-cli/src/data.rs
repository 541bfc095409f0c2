use crate::config::models::DatasetSource;
use crate::error::{CliError, Result};
use directories::ProjectDirs;
use gammadb::core::io::dataset::JsonDataset;
use gammadb::core::io::traits::DatasetFile;
use gammadb::core::models::dataset::ProteinEntry;
use std::fs::{self};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const CACHE_FILE_NAME: &str = "structural_comparisons.json";

#[derive(Debug)]
pub struct DataManager {
    base_path: PathBuf,
}

impl DataManager {
    pub fn new() -> Result<Self> {
        let path = Self::determine_data_path()?;
        debug!("DataManager initialized with path: {:?}", &path);
        Ok(Self { base_path: path })
    }

    pub fn with_custom_path(path: PathBuf) -> Self {
        Self { base_path: path }
    }

    pub fn get_data_path(&self) -> &Path {
        &self.base_path
    }

    /// Where the comparison cache lives unless configured otherwise.
    pub fn default_cache_path(&self) -> PathBuf {
        self.base_path.join(CACHE_FILE_NAME)
    }

    pub fn set_custom_path(path: &Path) -> Result<()> {
        if !path.is_absolute() {
            return Err(CliError::Argument(format!(
                "Data path must be absolute: {}",
                path.display()
            )));
        }
        let config_path = Self::get_path_config_file()?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(config_path, path.to_string_lossy().as_bytes()).map_err(CliError::from)
    }

    pub fn reset_path() -> Result<()> {
        if let Ok(config_path) = Self::get_path_config_file() {
            if config_path.exists() {
                fs::remove_file(config_path)?;
            }
        }
        Ok(())
    }

    fn determine_data_path() -> Result<PathBuf> {
        match Self::get_path_config_file() {
            Ok(config_path) if config_path.exists() => {
                let custom_path_str = fs::read_to_string(&config_path)?.trim().to_string();
                if custom_path_str.is_empty() {
                    warn!("Custom path config file is empty, falling back to default path.");
                    Self::get_default_data_path()
                } else {
                    Ok(PathBuf::from(custom_path_str))
                }
            }
            _ => Self::get_default_data_path(),
        }
    }

    fn get_path_config_file() -> Result<PathBuf> {
        ProjectDirs::from("org", "gammadb", "gammadb")
            .map(|dirs| dirs.config_dir().join("path.conf"))
            .ok_or_else(|| CliError::Data("Could not determine config directory path.".to_string()))
    }

    fn get_default_data_path() -> Result<PathBuf> {
        ProjectDirs::from("org", "gammadb", "gammadb")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                CliError::Data("Could not determine default data directory path.".to_string())
            })
    }
}

/// Loads the protein dataset from the backend chosen in the configuration.
pub async fn load_dataset(source: &DatasetSource) -> Result<Vec<ProteinEntry>> {
    match source {
        DatasetSource::Local(path) => {
            info!("Loading dataset from {:?}", path);
            JsonDataset::read_from_path(path).map_err(|e| CliError::FileParsing {
                path: path.clone(),
                source: e.into(),
            })
        }
        DatasetSource::Remote(url) => {
            info!("Fetching dataset from {}", url);
            let client = reqwest::Client::new();
            let entries: Vec<ProteinEntry> = client
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            JsonDataset::validate(&entries)?;
            Ok(entries)
        }
    }
}

pub fn find_entry<'a>(entries: &'a [ProteinEntry], id: &str) -> Result<&'a ProteinEntry> {
    entries
        .iter()
        .find(|entry| entry.id == id)
        .ok_or_else(|| CliError::Argument(format!("No dataset entry with id '{}'", id)))
}
