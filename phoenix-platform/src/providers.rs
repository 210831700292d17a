//! Provider traits and the [`Platform`] bundle handed to the sync layer.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

// ---------------------------------------------------------------------------
// Capability tier
// ---------------------------------------------------------------------------

/// Platform API level; gates the richer audio-service queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiLevel(pub u32);

impl ApiLevel {
    /// First level exposing output sample rate, frames-per-buffer and the
    /// low-latency feature flag.
    pub const LOW_LATENCY_AUDIO: ApiLevel = ApiLevel(17);

    pub fn supports_low_latency_audio(self) -> bool {
        self >= Self::LOW_LATENCY_AUDIO
    }
}

impl fmt::Display for ApiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API {}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Provider traits
// ---------------------------------------------------------------------------

/// Storage roots. Either may be absent on a given device.
pub trait StorageProvider {
    fn external_root(&self) -> Option<PathBuf>;
    fn internal_root(&self) -> Option<PathBuf>;
}

/// Filesystem probes used while resolving the config path.
pub trait FileProbe {
    fn exists(&self, path: &Path) -> bool;

    /// Whether a config file at `path` could be written: an existing file
    /// must be writable, a missing one needs a writable parent directory.
    fn can_write(&self, path: &Path) -> bool;
}

/// Audio-service queries.
///
/// The two `*_property` methods return the raw property text the service
/// hands back; callers parse it and report malformed text.
pub trait AudioProvider {
    /// Output sample rate property (low-latency tier only).
    fn output_sample_rate_property(&self) -> Result<String, ProviderError>;

    /// Native output sample rate of the music stream (any tier).
    fn native_output_sample_rate(&self) -> Result<u32, ProviderError>;

    /// Output frames-per-buffer property (low-latency tier only).
    fn frames_per_buffer_property(&self) -> Result<String, ProviderError>;

    /// Whether the device advertises the low-latency audio feature.
    fn has_low_latency_audio(&self) -> Result<bool, ProviderError>;
}

/// Display queries.
pub trait DisplayProvider {
    /// Refresh rate reported by the default display, in Hz. Unfiltered.
    fn refresh_rate(&self) -> Result<f64, ProviderError>;
}

// ---------------------------------------------------------------------------
// App paths
// ---------------------------------------------------------------------------

/// Install locations of the front-end itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppPaths {
    /// Directory holding bundled libretro cores; also the "no core selected"
    /// marker for the `libretro_path` preference.
    pub native_library_dir: PathBuf,
    /// Private data directory. Absent when the host cannot provide one.
    pub data_dir: Option<PathBuf>,
}

impl AppPaths {
    pub fn new(native_library_dir: impl Into<PathBuf>, data_dir: Option<PathBuf>) -> Self {
        Self {
            native_library_dir: native_library_dir.into(),
            data_dir,
        }
    }

    /// `<data dir>/<app>` with cores under `lib/`, via `dirs::data_dir()`.
    pub fn from_system(app: &str) -> Self {
        let data_dir = dirs::data_dir().map(|d| d.join(app));
        let native_library_dir = data_dir
            .as_deref()
            .map(|d| d.join("lib"))
            .unwrap_or_else(|| PathBuf::from("lib"));
        Self {
            native_library_dir,
            data_dir,
        }
    }

    /// `native_library_dir` in the string form preferences store paths in.
    pub fn native_library_dir_str(&self) -> String {
        self.native_library_dir.to_string_lossy().into_owned()
    }
}

// ---------------------------------------------------------------------------
// Platform bundle
// ---------------------------------------------------------------------------

/// Every provider the sync layer consumes, borrowed for one operation.
pub struct Platform<'a> {
    pub api_level: ApiLevel,
    pub app: AppPaths,
    pub storage: &'a dyn StorageProvider,
    pub files: &'a dyn FileProbe,
    pub audio: &'a dyn AudioProvider,
    pub display: &'a dyn DisplayProvider,
}

impl fmt::Debug for Platform<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Platform")
            .field("api_level", &self.api_level)
            .field("app", &self.app)
            .finish_non_exhaustive()
    }
}
