//! Error types for scanning and rendering.
//!
//! Only I/O and serialization can fail. A missing function marker or an
//! unrecognized statement is not an error; the scan degrades to the baseline
//! table instead.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while scanning a source file or rendering a table.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Input or configuration file could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results with [`ScanError`].
pub type Result<T> = std::result::Result<T, ScanError>;
