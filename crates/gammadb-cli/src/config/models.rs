use gammadb::engine::config::ComparisonConfig;
use std::path::PathBuf;

/// Where the protein dataset is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Local(PathBuf),
    Remote(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub comparison: ComparisonConfig,
    pub dataset: DatasetSource,
}
