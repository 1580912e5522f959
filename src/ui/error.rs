// ABOUTME: Error types for persisted UI preferences
// ABOUTME: Defines failures of preference store adapters

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("Failed to access preference file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt preference file: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid stored value for '{key}': {value}")]
    InvalidValue { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, PreferenceError>;
