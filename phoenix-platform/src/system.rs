//! Real host providers.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::providers::{FileProbe, StorageProvider};

/// Storage roots read from environment variables at query time.
///
/// Unset or empty variables count as absent roots.
#[derive(Debug, Clone)]
pub struct SystemStorage {
    external_var: OsString,
    internal_var: OsString,
}

impl Default for SystemStorage {
    fn default() -> Self {
        Self::with_vars("EXTERNAL_STORAGE", "INTERNAL_STORAGE")
    }
}

impl SystemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vars(external_var: impl Into<OsString>, internal_var: impl Into<OsString>) -> Self {
        Self {
            external_var: external_var.into(),
            internal_var: internal_var.into(),
        }
    }
}

fn root_from_env(var: &OsString) -> Option<PathBuf> {
    let root = std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    if root.is_none() {
        tracing::debug!("storage root {} is not set", var.to_string_lossy());
    }
    root
}

impl StorageProvider for SystemStorage {
    fn external_root(&self) -> Option<PathBuf> {
        root_from_env(&self.external_var)
    }

    fn internal_root(&self) -> Option<PathBuf> {
        root_from_env(&self.internal_var)
    }
}

/// `std::fs`-backed probes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFiles;

impl FileProbe for SystemFiles {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn can_write(&self, path: &Path) -> bool {
        let writable = match std::fs::metadata(path) {
            Ok(meta) => meta.is_file() && !meta.permissions().readonly(),
            Err(_) => path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .and_then(|p| std::fs::metadata(p).ok())
                .map(|m| m.is_dir() && !m.permissions().readonly())
                .unwrap_or(false),
        };
        if !writable {
            tracing::debug!("{} is not writable", path.display());
        }
        writable
    }
}
