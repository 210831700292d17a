//! "Save new config": write the current document under a fresh name.
//!
//! The name is inferred from the selected core (`<core>.cfg`, then
//! `<core>-1.cfg` .. `<core>-15.cfg` on collision). When there is no usable
//! core, or every candidate is taken, a timestamped name is used instead.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};

use phoenix_core::ConfigDocument;
use phoenix_platform::FileProbe;

use crate::error::SyncError;

/// Candidate names tried before falling back to a timestamp.
pub const NAME_ATTEMPTS: u32 = 16;

/// Directory for new configs: the configured one, else the directory of the
/// config currently in use.
pub fn config_dir_for(
    menu_config_dir: Option<&Path>,
    current_config: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(dir) = menu_config_dir.filter(|d| !d.as_os_str().is_empty()) {
        return Some(dir.to_path_buf());
    }
    current_config
        .filter(|p| !p.as_os_str().is_empty())
        .and_then(Path::parent)
        .map(Path::to_path_buf)
}

/// Pick an unused config path in `config_dir` for the core at `core_path`.
pub fn new_config_path(config_dir: &Path, core_path: &str, files: &dyn FileProbe) -> PathBuf {
    let core = Path::new(core_path);
    if !core_path.is_empty() && files.exists(core) {
        if let Some(stem) = core.file_stem().map(|s| s.to_string_lossy()) {
            for attempt in 0..NAME_ATTEMPTS {
                let name = if attempt == 0 {
                    format!("{stem}.cfg")
                } else {
                    format!("{stem}-{attempt}.cfg")
                };
                let candidate = config_dir.join(name);
                if !files.exists(&candidate) {
                    return candidate;
                }
            }
        }
    }
    tracing::warn!("cannot infer new config path; using current time");
    config_dir.join(dated_file_name(&Local::now()))
}

/// `RetroArch-MMDD-HHMMSS.cfg`
pub fn dated_file_name<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    format!("RetroArch-{}.cfg", at.format("%m%d-%H%M%S"))
}

/// Save `doc` under a new name and return the path written.
pub fn save_new_config(
    menu_config_dir: Option<&Path>,
    current_config: Option<&Path>,
    core_path: &str,
    doc: &ConfigDocument,
    files: &dyn FileProbe,
) -> Result<PathBuf, SyncError> {
    let dir = config_dir_for(menu_config_dir, current_config).ok_or_else(|| {
        tracing::error!("config directory not set; cannot save new config");
        SyncError::NoConfigDirectory
    })?;
    let path = new_config_path(&dir, core_path, files);
    doc.save_at(&path)?;
    tracing::info!("saved new config to \"{}\"", path.display());
    Ok(path)
}
