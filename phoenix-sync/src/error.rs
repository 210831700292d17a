//! Error types for phoenix-sync.

use std::path::PathBuf;

use thiserror::Error;

use phoenix_core::CoreError;
use phoenix_platform::ProviderError;

/// All errors that can arise from sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from the preference store or config document.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// An environment query failed or returned something unusable.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A stored preference string that should hold a number does not.
    #[error("preference '{key}' has malformed value '{value}': {source}")]
    MalformedPreference {
        key: String,
        value: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Neither a config directory nor a current config path was given.
    #[error("config directory not set; cannot save new config")]
    NoConfigDirectory,

    /// Settings JSON error, includes file path.
    #[error("failed to parse settings at {path}: {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}

/// Convenience constructor for [`SyncError::MalformedPreference`].
pub(crate) fn malformed(
    key: &str,
    value: &str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> SyncError {
    SyncError::MalformedPreference {
        key: key.to_owned(),
        value: value.to_owned(),
        source: Box::new(source),
    }
}
