//! Preferences → config writer.
//!
//! The existing file is loaded first so keys this module does not manage
//! survive; every managed key is then overwritten and the whole document is
//! written back atomically.

use std::path::{Path, PathBuf};

use phoenix_core::{ConfigDocument, CoreError, PreferenceStore};
use phoenix_platform::Platform;

use crate::derive::{self, AspectPolicy};
use crate::error::SyncError;
use crate::keys;
use crate::settings::PushConfig;

/// Result of a push that got as far as writing.
#[derive(Debug)]
pub enum PushOutcome {
    /// The document was written.
    Written { path: PathBuf },
    /// The file already held exactly this text; nothing was written.
    Unchanged { path: PathBuf },
    /// The final write failed. Logged; preferences are unaffected.
    WriteFailed { path: PathBuf, error: CoreError },
}

/// Write the managed key set derived from `prefs` and `platform` to `path`.
///
/// Malformed preferences and failed environment queries abort before
/// anything is written. A failed write is reported through
/// [`PushOutcome::WriteFailed`] rather than as an error.
pub fn push_to_file(
    path: &Path,
    prefs: &dyn PreferenceStore,
    platform: &Platform<'_>,
    config: &PushConfig,
) -> Result<PushOutcome, SyncError> {
    let mut doc = ConfigDocument::load_or_default(path);
    tracing::info!("writing config to: {}", path.display());

    apply_preferences(&mut doc, prefs, platform, config)?;

    let text = doc.to_text();
    if std::fs::read_to_string(path).ok().as_deref() == Some(text.as_str()) {
        tracing::debug!("unchanged: {}", path.display());
        return Ok(PushOutcome::Unchanged {
            path: path.to_path_buf(),
        });
    }

    match doc.save_at(path) {
        Ok(()) => Ok(PushOutcome::Written {
            path: path.to_path_buf(),
        }),
        Err(error) => {
            tracing::error!("failed to save config file to {}: {error}", path.display());
            Ok(PushOutcome::WriteFailed {
                path: path.to_path_buf(),
                error,
            })
        }
    }
}

/// Overwrite every managed key in `doc`. Unmanaged keys are left alone.
///
/// Stops at the first malformed preference or failed query; keys set before
/// that point stay set.
pub fn apply_preferences(
    doc: &mut ConfigDocument,
    prefs: &dyn PreferenceStore,
    platform: &Platform<'_>,
    config: &PushConfig,
) -> Result<(), SyncError> {
    let data_dir = platform.app.data_dir.clone().unwrap_or_default();
    let native_dir = platform.app.native_library_dir_str();

    doc.set_string(keys::LIBRETRO_PATH, prefs.get_string(keys::LIBRETRO_PATH, &native_dir));
    doc.set_string(keys::BROWSER_DIRECTORY, prefs.get_string(keys::BROWSER_DIRECTORY, ""));
    doc.set_bool(keys::AUDIO_RATE_CONTROL, prefs.get_bool(keys::AUDIO_RATE_CONTROL, true));

    doc.set_int(keys::AUDIO_OUT_RATE, derive::optimal_sampling_rate(platform)?);
    derive::audio_latency(platform, prefs, config)?.apply(doc);

    for (key, default) in [
        (keys::AUDIO_ENABLE, true),
        (keys::VIDEO_SMOOTH, true),
        (keys::VIDEO_ALLOW_ROTATE, true),
        (keys::SAVESTATE_AUTO_LOAD, true),
        (keys::SAVESTATE_AUTO_SAVE, false),
        (keys::REWIND_ENABLE, false),
        (keys::VIDEO_VSYNC, true),
        (keys::INPUT_AUTODETECT_ENABLE, true),
        (keys::INPUT_DEBUG_ENABLE, false),
    ] {
        doc.set_bool(key, prefs.get_bool(key, default));
    }
    doc.set_int(
        keys::INPUT_BACK_BEHAVIOR,
        derive::int_preference(prefs, keys::INPUT_BACK_BEHAVIOR, "0")?,
    );

    for (config_key, pref_key) in keys::ICADE_PROFILES.iter().zip(keys::ICADE_PROFILE_PREFS) {
        doc.set_int(config_key, derive::int_preference(prefs, pref_key, "0")?);
    }

    doc.set_double(
        keys::VIDEO_REFRESH_RATE,
        derive::resolve_refresh_rate(prefs, platform.display)?,
    );
    doc.set_bool(keys::VIDEO_THREADED, prefs.get_bool(keys::VIDEO_THREADED, true));

    AspectPolicy::from_prefs(prefs)?.apply(doc);

    doc.set_bool(keys::VIDEO_SCALE_INTEGER, prefs.get_bool(keys::VIDEO_SCALE_INTEGER, false));

    let shader = prefs.get_string(keys::VIDEO_SHADER, "");
    let shader_enable = prefs.get_bool(keys::VIDEO_SHADER_ENABLE, false)
        && platform.files.exists(Path::new(&shader));
    doc.set_string(keys::VIDEO_SHADER, shader);
    doc.set_bool(keys::VIDEO_SHADER_ENABLE, shader_enable);

    let use_overlay = prefs.get_bool(keys::INPUT_OVERLAY_ENABLE, true);
    doc.set_bool(keys::INPUT_OVERLAY_ENABLE, use_overlay);
    if use_overlay {
        let default_overlay = data_dir.join(&config.default_overlay);
        doc.set_string(
            keys::INPUT_OVERLAY,
            prefs.get_string(keys::INPUT_OVERLAY, &default_overlay.to_string_lossy()),
        );
        doc.set_double(
            keys::INPUT_OVERLAY_OPACITY,
            widen(prefs.get_float(keys::INPUT_OVERLAY_OPACITY, 1.0)),
        );
    } else {
        doc.set_string(keys::INPUT_OVERLAY, "");
    }

    for (dir_key, enable_key) in [
        (keys::SAVEFILE_DIRECTORY, keys::SAVEFILE_DIRECTORY_ENABLE),
        (keys::SAVESTATE_DIRECTORY, keys::SAVESTATE_DIRECTORY_ENABLE),
        (keys::SYSTEM_DIRECTORY, keys::SYSTEM_DIRECTORY_ENABLE),
    ] {
        let dir = if prefs.get_bool(enable_key, false) {
            prefs.get_string(dir_key, "")
        } else {
            String::new()
        };
        doc.set_string(dir_key, dir);
    }

    doc.set_bool(keys::VIDEO_FONT_ENABLE, prefs.get_bool(keys::VIDEO_FONT_ENABLE, true));
    doc.set_string(
        keys::GAME_HISTORY_PATH,
        data_dir.join(&config.history_file_name).to_string_lossy(),
    );

    for player in 1..=keys::PLAYERS {
        for button in keys::BUTTONS {
            let key = keys::player_button_key(player, button);
            doc.set_int(&key, i64::from(prefs.get_int(&key, 0)));
        }
    }
    Ok(())
}

/// Widen a stored float through its shortest decimal form, so `0.7f32`
/// is written as `0.7` rather than `0.699999988079071`.
fn widen(value: f32) -> f64 {
    value.to_string().parse().unwrap_or(f64::from(value))
}
