use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureRole {
    Reference,
    Target,
}

impl fmt::Display for StructureRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureRole::Reference => f.write_str("Reference"),
            StructureRole::Target => f.write_str("Target"),
        }
    }
}

/// Failures that reach the caller of a comparison.
///
/// Aligner unavailability, aligner failures and cache I/O during a comparison
/// are recovered inside the engine and never surface as this type.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{role} structure file not found: {path}", path = path.display())]
    StructureNotFound { role: StructureRole, path: PathBuf },
}
