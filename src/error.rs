//! Error types for violation loading and normalization.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading violation lists or normalizer configuration.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            LoadError::InvalidJson { .. } => 2,
        }
    }
}

/// Failure reported by a name converter.
///
/// Returned unchanged from `ConstraintViolationListNormalizer::normalize`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameConverterError {
    #[error("cannot convert property name \"{name}\": {reason}")]
    Unmappable { name: String, reason: String },
}

impl NameConverterError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}
