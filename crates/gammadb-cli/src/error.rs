use gammadb::core::io::dataset::DatasetError;
use gammadb::engine::error::EngineError;
use gammadb::workflows::analyze::AnalysisError;
use gammadb::workflows::export::ExportError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data management error: {0}")]
    Data(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Request failed with status {status}")]
    Status { status: u16 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
