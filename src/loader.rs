//! Loading violation lists and normalizer configuration from JSON.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::config::NormalizerConfig;
use crate::error::LoadError;
use crate::types::ConstraintViolationList;

/// Load a violation list from a JSON file holding an array of violations.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist,
/// or `LoadError::InvalidJson` if the file isn't a valid violation array.
pub fn load_violations(path: &Path) -> Result<ConstraintViolationList, LoadError> {
    load_json(path)
}

/// Load a violation list from a JSON string.
///
/// # Errors
///
/// Returns `LoadError::InvalidJson` if the string isn't a valid violation array.
pub fn load_violations_str(content: &str) -> Result<ConstraintViolationList, LoadError> {
    serde_json::from_str(content).map_err(|source| LoadError::InvalidJson { source })
}

/// Load normalizer configuration from a JSON file.
pub fn load_config(path: &Path) -> Result<NormalizerConfig, LoadError> {
    load_json(path)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "loaded JSON file");

    serde_json::from_str(&content).map_err(|source| LoadError::InvalidJson { source })
}
