//! Config path resolution.
//!
//! Probe order:
//! 1. An existing file under the external root, the internal root, then the
//!    fixed fallback root (absent roots are skipped).
//! 2. The internal root, when the file there could be written.
//! 3. The external root, gated on the *internal* path being writable.
//! 4. The app's private data directory.
//! 5. The emergency root.
//!
//! Resolution never fails; the last step always produces a path.

use std::path::PathBuf;

use phoenix_core::PreferenceStore;
use phoenix_platform::{AppPaths, FileProbe, Platform, StorageProvider};

use crate::keys;
use crate::settings::ResolverConfig;

// ---------------------------------------------------------------------------
// File name
// ---------------------------------------------------------------------------

/// Which config file name applies to the current preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigFileName {
    /// One shared file for every core.
    Global(String),
    /// A per-core file; holds the sanitized core name without extension.
    PerCore(String),
}

impl ConfigFileName {
    /// Per-core only when global config is off and a core other than the
    /// bundled library directory is selected.
    pub fn for_prefs(
        app: &AppPaths,
        prefs: &dyn PreferenceStore,
        config: &ResolverConfig,
    ) -> Self {
        let native_dir = app.native_library_dir_str();
        let global = prefs.get_bool(keys::GLOBAL_CONFIG_ENABLE, true);
        let core_path = prefs.get_string(keys::LIBRETRO_PATH, &native_dir);

        if !global && core_path != native_dir {
            ConfigFileName::PerCore(sanitize_core_name(&core_path))
        } else {
            ConfigFileName::Global(config.global_file_name.clone())
        }
    }

    pub fn file_name(&self) -> String {
        match self {
            ConfigFileName::Global(name) => name.clone(),
            ConfigFileName::PerCore(stem) => format!("{stem}.cfg"),
        }
    }
}

/// Reduce a core library path to a config file stem.
///
/// Takes the text between the last `/` and the last `.` of the file name,
/// strips the first `neon` and then the first `libretro_`, and trims the
/// underscores those removals leave at either end.
///
/// `/x/libretro_neon_foo.so` → `foo`
pub fn sanitize_core_name(path: &str) -> String {
    let base = path.rsplit('/').next().unwrap_or(path);
    let stem = base.rfind('.').map_or(base, |i| &base[..i]);

    let mut name = stem.to_owned();
    let mut stripped = false;
    for marker in ["neon", "libretro_"] {
        if let Some(i) = name.find(marker) {
            name.replace_range(i..i + marker.len(), "");
            stripped = true;
        }
    }
    if stripped {
        name = name.trim_matches('_').to_owned();
    }
    name
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Computes the canonical config path from storage roots and file probes.
pub struct PathResolver<'a> {
    storage: &'a dyn StorageProvider,
    files: &'a dyn FileProbe,
    config: ResolverConfig,
}

impl<'a> PathResolver<'a> {
    pub fn new(
        storage: &'a dyn StorageProvider,
        files: &'a dyn FileProbe,
        config: ResolverConfig,
    ) -> Self {
        Self {
            storage,
            files,
            config,
        }
    }

    pub fn for_platform(platform: &Platform<'a>, config: ResolverConfig) -> Self {
        Self::new(platform.storage, platform.files, config)
    }

    /// Resolve the config path. Total: always returns a path.
    pub fn resolve(&self, app: &AppPaths, prefs: &dyn PreferenceStore) -> PathBuf {
        let name = ConfigFileName::for_prefs(app, prefs, &self.config).file_name();
        let path = self.resolve_name(app, &name);
        tracing::info!("config path: {}", path.display());
        path
    }

    fn resolve_name(&self, app: &AppPaths, name: &str) -> PathBuf {
        let external = self.storage.external_root();
        let internal = self.storage.internal_root();

        let existing = external
            .iter()
            .chain(internal.iter())
            .chain(std::iter::once(&self.config.fallback_root))
            .map(|root| root.join(name))
            .find(|candidate| self.files.exists(candidate));
        if let Some(found) = existing {
            tracing::debug!("found existing config at {}", found.display());
            return found;
        }

        let internal_writable = internal
            .as_ref()
            .is_some_and(|root| self.files.can_write(&root.join(name)));

        if let Some(root) = &internal {
            if internal_writable {
                return root.join(name);
            }
        }
        // Gated on the internal path, not the external one. Kept until a
        // product decision changes it.
        if let Some(root) = &external {
            if internal_writable {
                return root.join(name);
            }
        }
        if let Some(data_dir) = &app.data_dir {
            return data_dir.join(name);
        }
        tracing::warn!("no usable storage root; using emergency fallback");
        self.config.emergency_root.join(name)
    }
}
