//! Config → preferences readback.
//!
//! Only the keys in [`PULL_KEYS`](crate::keys::PULL_KEYS) are touched. For
//! each one the preference afterwards mirrors the file: present with the
//! file's value, or removed. All edits land in one commit.

use std::path::{Path, PathBuf};

use phoenix_core::{ConfigDocument, CoreError, PreferenceEditor, PreferenceStore};

use crate::error::SyncError;
use crate::keys::{PullKind, PULL_KEYS};

/// Result of a pull.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullOutcome {
    /// The file was read and the allow-listed keys were committed.
    Applied {
        path: PathBuf,
        copied: usize,
        removed: usize,
    },
    /// The file could not be read; preferences are untouched.
    Skipped { path: PathBuf },
}

/// Copy the allow-listed keys from the config at `path` into `prefs`.
///
/// An unreadable file is not an error. The only failure is the preference
/// store rejecting the commit.
pub fn pull_from_file<P: PreferenceStore + ?Sized>(
    path: &Path,
    prefs: &mut P,
) -> Result<PullOutcome, SyncError> {
    let doc = match ConfigDocument::load_at(path) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::debug!("config readback skipped: {e}");
            return Ok(PullOutcome::Skipped {
                path: path.to_path_buf(),
            });
        }
    };
    tracing::info!("config readback from: {}", path.display());

    let mut edit = PreferenceEditor::new();
    let (mut copied, mut removed) = (0, 0);
    for &(key, kind) in PULL_KEYS {
        if !doc.key_exists(key) {
            tracing::debug!("'{key}' absent from config; removing preference");
            edit.remove(key);
            removed += 1;
            continue;
        }
        match copy_key(&doc, &mut edit, key, kind) {
            Ok(()) => copied += 1,
            Err(e) => {
                tracing::warn!("dropping preference '{key}': {e}");
                edit.remove(key);
                removed += 1;
            }
        }
    }
    edit.commit(prefs)?;

    Ok(PullOutcome::Applied {
        path: path.to_path_buf(),
        copied,
        removed,
    })
}

fn copy_key(
    doc: &ConfigDocument,
    edit: &mut PreferenceEditor,
    key: &str,
    kind: PullKind,
) -> Result<(), CoreError> {
    match kind {
        PullKind::String => {
            edit.put_string(key, doc.get_string(key)?);
        }
        PullKind::Bool => {
            edit.put_bool(key, doc.get_bool(key)?);
        }
        PullKind::Float => {
            edit.put_float(key, doc.get_double(key)? as f32);
        }
    }
    Ok(())
}
