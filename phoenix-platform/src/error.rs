//! Error types for phoenix-platform.

use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by environment providers.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider has nothing to report on this host.
    #[error("{provider} is unavailable")]
    Unavailable { provider: &'static str },

    /// The provider answered, but not with something usable.
    #[error("{provider} reported malformed value '{value}': {reason}")]
    Malformed {
        provider: &'static str,
        value: String,
        reason: String,
    },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Platform profile JSON error, includes file path.
    #[error("failed to parse platform profile at {path}: {source}")]
    Profile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience constructor for [`ProviderError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ProviderError {
    ProviderError::Io {
        path: path.into(),
        source,
    }
}
