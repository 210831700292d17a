//! Error types for phoenix-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from preference and config document operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Preference file JSON error, includes file path.
    #[error("preference JSON error at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// `get_*` on a key the document does not contain.
    #[error("config key '{key}' does not exist")]
    MissingKey { key: String },

    /// The stored value cannot be read as the requested type.
    #[error("config key '{key}' holds {found}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: String,
    },
}

/// Convenience constructor for [`CoreError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CoreError {
    CoreError::Io {
        path: path.into(),
        source,
    }
}
