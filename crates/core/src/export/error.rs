//! Export error types.

use std::path::PathBuf;

use finmart_shared::AppError;
use thiserror::Error;

/// Errors raised while writing CSV output.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The CSV writer failed.
    #[error("CSV writer error: {0}")]
    Csv(#[from] csv::Error),

    /// A file or directory could not be created or flushed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path being written.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// In-memory output was not valid UTF-8.
    #[error("UTF-8 conversion error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        Self::Export(err.to_string())
    }
}
