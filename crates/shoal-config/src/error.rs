//! Error types for configuration operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO failure while reading a configuration document.
    #[error("configuration io failure")]
    Io {
        /// Path of the document that could not be read.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The configuration document was not valid JSON.
    #[error("configuration parse failure")]
    Parse {
        /// Path of the document that failed to parse, when read from disk.
        path: Option<PathBuf>,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// A field carried a value the engine cannot act on.
    #[error("invalid configuration field")]
    InvalidField {
        /// Dotted path of the field that failed validation.
        field: String,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_field(field: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason,
        }
    }
}

/// Result wrapper for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
