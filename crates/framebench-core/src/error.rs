//! Report error types.

use std::path::PathBuf;

/// Result type for report operations.
pub type ReportResult<T> = std::result::Result<T, ReportError>;

/// Report error type.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Filesystem error on a specific path.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path that was being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration {}: {reason}", path.display())]
    ConfigParse {
        /// Configuration file path.
        path: PathBuf,
        /// Parser error message.
        reason: String,
    },

    /// Configuration values are invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file extension is not recognised.
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// Report serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Index target directory does not exist.
    #[error("The target directory '{}' does not exist", .0.display())]
    TargetMissing(PathBuf),
}

impl ReportError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ReportError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}
