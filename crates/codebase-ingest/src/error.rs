//! Error types for reading the reference dataset.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a reference dataset.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    /// Dataset file could not be read.
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not well-formed or does not have the codebase shape.
    #[error("failed to parse XML {source_name}: {message}")]
    Xml {
        source_name: String,
        message: String,
    },

    /// A date attribute could not be parsed.
    #[error("invalid {field} date '{value}' on code '{code}' in {source_name}")]
    InvalidDate {
        field: &'static str,
        value: String,
        code: String,
        source_name: String,
    },
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for dataset loading.
pub type Result<T> = std::result::Result<T, IngestError>;
