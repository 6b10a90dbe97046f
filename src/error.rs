//! Crate-level error type

use crate::config::ConfigError;
use crate::record::ParseError;
use thiserror::Error;

/// Errors that can abort a lineage operation
#[derive(Debug, Error)]
pub enum LineageError {
    #[error("Record parse error: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Person not found: {0}")]
    PersonNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for lineage operations
pub type LineageResult<T> = Result<T, LineageError>;
