use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while decoding or exporting Voltcraft data files
#[derive(Debug, Error)]
pub enum VoltcraftError {
    /// Source file missing or unreadable
    #[error("cannot read {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Malformed file contents (bad markers, truncation, corrupted timestamps)
    #[error("Format error: {0}")]
    Format(String),
    /// I/O errors while writing exports
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// CSV writer errors
    #[cfg(feature = "csv")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// JSON serialization errors
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VoltcraftError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        VoltcraftError::Format(msg.into())
    }

    /// True for errors caused by the file contents rather than the environment
    pub fn is_format_error(&self) -> bool {
        matches!(self, VoltcraftError::Format(_))
    }
}

pub type Result<T> = std::result::Result<T, VoltcraftError>;
