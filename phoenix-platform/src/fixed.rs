//! Fixed-answer providers.
//!
//! [`StaticPlatform`] answers storage, audio and display queries from a
//! profile (loadable from JSON); an unset field means "unavailable".
//! [`MemoryFiles`] answers file probes from two in-memory path sets.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, ProviderError};
use crate::providers::{
    ApiLevel, AppPaths, AudioProvider, DisplayProvider, FileProbe, Platform, StorageProvider,
};

// ---------------------------------------------------------------------------
// StaticPlatform
// ---------------------------------------------------------------------------

/// A device described up front.
///
/// ```json
/// {
///   "api_level": 17,
///   "external_storage": "/storage/sdcard0",
///   "output_sample_rate": "48000",
///   "frames_per_buffer": "256",
///   "low_latency_audio": true,
///   "refresh_rate": 60.0
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticPlatform {
    pub api_level: ApiLevel,
    pub external_storage: Option<PathBuf>,
    pub internal_storage: Option<PathBuf>,
    /// Raw output-sample-rate property text.
    pub output_sample_rate: Option<String>,
    pub native_sample_rate: Option<u32>,
    /// Raw frames-per-buffer property text.
    pub frames_per_buffer: Option<String>,
    pub low_latency_audio: Option<bool>,
    pub refresh_rate: Option<f64>,
}

impl StaticPlatform {
    /// Load a profile from a JSON file.
    pub fn load_at(path: &Path) -> Result<Self, ProviderError> {
        let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        let profile: Self = serde_json::from_str(&contents).map_err(|e| ProviderError::Profile {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::info!("loaded platform profile from {}", path.display());
        Ok(profile)
    }

    /// Bundle this profile with a file probe and app paths.
    pub fn platform<'a>(&'a self, files: &'a dyn FileProbe, app: AppPaths) -> Platform<'a> {
        Platform {
            api_level: self.api_level,
            app,
            storage: self,
            files,
            audio: self,
            display: self,
        }
    }
}

fn available<T: Clone>(value: &Option<T>, provider: &'static str) -> Result<T, ProviderError> {
    value
        .clone()
        .ok_or(ProviderError::Unavailable { provider })
}

impl StorageProvider for StaticPlatform {
    fn external_root(&self) -> Option<PathBuf> {
        self.external_storage.clone()
    }

    fn internal_root(&self) -> Option<PathBuf> {
        self.internal_storage.clone()
    }
}

impl AudioProvider for StaticPlatform {
    fn output_sample_rate_property(&self) -> Result<String, ProviderError> {
        available(&self.output_sample_rate, "output sample rate")
    }

    fn native_output_sample_rate(&self) -> Result<u32, ProviderError> {
        available(&self.native_sample_rate, "native output sample rate")
    }

    fn frames_per_buffer_property(&self) -> Result<String, ProviderError> {
        available(&self.frames_per_buffer, "frames per buffer")
    }

    fn has_low_latency_audio(&self) -> Result<bool, ProviderError> {
        available(&self.low_latency_audio, "low-latency audio feature")
    }
}

impl DisplayProvider for StaticPlatform {
    fn refresh_rate(&self) -> Result<f64, ProviderError> {
        available(&self.refresh_rate, "display refresh rate")
    }
}

// ---------------------------------------------------------------------------
// MemoryFiles
// ---------------------------------------------------------------------------

/// File probe over explicit path sets.
#[derive(Debug, Clone, Default)]
pub struct MemoryFiles {
    existing: BTreeSet<PathBuf>,
    writable: BTreeSet<PathBuf>,
}

impl MemoryFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `path` as an existing file.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.existing.insert(path.into());
        self
    }

    /// Mark `path` as writable.
    pub fn with_writable(mut self, path: impl Into<PathBuf>) -> Self {
        self.writable.insert(path.into());
        self
    }
}

impl FileProbe for MemoryFiles {
    fn exists(&self, path: &Path) -> bool {
        self.existing.contains(path)
    }

    fn can_write(&self, path: &Path) -> bool {
        self.writable.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn unset_fields_are_unavailable() {
        let profile = StaticPlatform::default();
        let err = profile.refresh_rate().unwrap_err();
        assert!(matches!(err, ProviderError::Unavailable { .. }));
        assert!(err.to_string().contains("display refresh rate"));
        assert!(profile.native_output_sample_rate().is_err());
        assert_eq!(profile.external_root(), None);
    }

    #[test]
    fn load_profile_from_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("device.json");
        std::fs::write(
            &path,
            r#"{"api_level": 17, "output_sample_rate": "48000", "low_latency_audio": false}"#,
        )
        .unwrap();

        let profile = StaticPlatform::load_at(&path).unwrap();
        assert_eq!(profile.api_level, ApiLevel(17));
        assert_eq!(profile.output_sample_rate_property().unwrap(), "48000");
        assert!(!profile.has_low_latency_audio().unwrap());
        assert!(profile.frames_per_buffer_property().is_err());
    }

    #[test]
    fn load_bad_profile_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("device.json");
        std::fs::write(&path, "{ \"api_level\": \"seventeen\" }").unwrap();
        let err = StaticPlatform::load_at(&path).unwrap_err();
        assert!(matches!(err, ProviderError::Profile { .. }), "got: {err}");
        assert!(err.to_string().contains("device.json"));
    }

    #[test]
    fn memory_files_answer_from_sets() {
        let files = MemoryFiles::new()
            .with_file("/sdcard/retroarch.cfg")
            .with_writable("/data/retroarch.cfg");
        assert!(files.exists(Path::new("/sdcard/retroarch.cfg")));
        assert!(!files.can_write(Path::new("/sdcard/retroarch.cfg")));
        assert!(files.can_write(Path::new("/data/retroarch.cfg")));
    }
}
