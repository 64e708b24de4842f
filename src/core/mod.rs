use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error types for the pacontrol application.
///
/// Covers configuration loading, parsing and validation. Audio session
/// failures live in [`crate::services::mixer::MixerError`].
#[derive(Error, Debug)]
pub enum PacontrolError {
    /// Configuration field missing or invalid
    #[error("invalid config field '{field}': {reason}")]
    InvalidConfigField {
        /// The field that is invalid
        field: String,
        /// Reason why the field is invalid
        reason: String,
    },

    /// I/O operation error with file context
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where I/O error occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// Standard I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },
}

/// A specialized `Result` type for pacontrol operations.
pub type Result<T> = std::result::Result<T, PacontrolError>;

impl PacontrolError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl std::fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        PacontrolError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an I/O error carrying the path it happened on.
    pub fn io_at(error: &std::io::Error, path: &Path) -> Self {
        PacontrolError::IoError {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }

    /// Creates an invalid-field error.
    pub fn invalid_field(field: &str, reason: impl Into<String>) -> Self {
        PacontrolError::InvalidConfigField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
