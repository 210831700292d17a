//! Tunables for path resolution and push.
//!
//! Defaults match the stock Android layout; a JSON settings file can override
//! any field.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, SyncError};

/// Fixed locations and names used by [`PathResolver`](crate::PathResolver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Probed for an existing config after the external and internal roots.
    pub fallback_root: PathBuf,
    /// Last resort when nothing else is usable.
    pub emergency_root: PathBuf,
    /// File name used in global-config mode.
    pub global_file_name: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fallback_root: PathBuf::from("/mnt/extsd"),
            emergency_root: PathBuf::from("/mnt/sd"),
            global_file_name: "retroarch.cfg".to_owned(),
        }
    }
}

/// Fixed values written by [`push_to_file`](crate::push_to_file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushConfig {
    /// Joined onto the app data directory for `game_history_path`.
    pub history_file_name: String,
    /// Joined onto the app data directory for the default `input_overlay`.
    pub default_overlay: PathBuf,
    /// `audio_latency` written when latency is chosen automatically.
    pub auto_latency: i64,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            history_file_name: "retroarch-history.txt".to_owned(),
            default_overlay: PathBuf::from("overlays/snes-landscape.cfg"),
            auto_latency: 64,
        }
    }
}

/// Both config sections, as stored in a settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    pub resolver: ResolverConfig,
    pub push: PushConfig,
}

impl SyncSettings {
    /// Load settings from JSON; a missing file yields the defaults.
    pub fn load_at(path: &Path) -> Result<Self, SyncError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        serde_json::from_str(&contents).map_err(|e| SyncError::Settings {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
