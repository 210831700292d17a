//! Config → preferences readback tests.

use assert_fs::prelude::*;
use phoenix_core::{FilePreferences, MemoryPreferences, PrefValue, PreferenceStore};
use phoenix_sync::keys::PULL_KEYS;
use phoenix_sync::{pull_from_file, PullOutcome};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn copies_typed_values() {
    init_logging();
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let cfg = dir.child("retroarch.cfg");
    cfg.write_str(
        "rgui_browser_directory = \"/sdcard/roms\"\n\
         video_vsync = false\n\
         video_smooth = true\n\
         input_overlay_opacity = 0.7\n\
         savefile_directory_enable = \"1\"\n",
    )
    .expect("write");

    let mut prefs = MemoryPreferences::new();
    let outcome = pull_from_file(cfg.path(), &mut prefs).expect("pull");

    assert_eq!(
        prefs.get("rgui_browser_directory"),
        Some(PrefValue::String("/sdcard/roms".into()))
    );
    assert_eq!(prefs.get("video_vsync"), Some(PrefValue::Bool(false)));
    assert_eq!(prefs.get("video_smooth"), Some(PrefValue::Bool(true)));
    assert_eq!(prefs.get("input_overlay_opacity"), Some(PrefValue::Float(0.7)));
    assert_eq!(prefs.get("savefile_directory_enable"), Some(PrefValue::Bool(true)));
    match outcome {
        PullOutcome::Applied { copied, removed, .. } => {
            assert_eq!(copied, 5);
            assert_eq!(removed, PULL_KEYS.len() - 5);
        }
        other => panic!("expected applied, got {other:?}"),
    }
}

#[test]
fn absent_key_removes_stale_preference() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let cfg = dir.child("retroarch.cfg");
    cfg.write_str("video_smooth = true\n").expect("write");

    let mut prefs = MemoryPreferences::new().with("video_vsync", PrefValue::Bool(false));
    pull_from_file(cfg.path(), &mut prefs).expect("pull");

    assert!(!prefs.contains("video_vsync"), "stale key must be removed, not defaulted");
}

#[test]
fn keys_outside_allow_list_are_untouched() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let cfg = dir.child("retroarch.cfg");
    cfg.write_str("video_refresh_rate = 75.0\naudio_latency = 128\n").expect("write");

    let mut prefs = MemoryPreferences::new()
        .with("video_refresh_rate", PrefValue::String("59.94".into()))
        .with("libretro_path", PrefValue::String("/cores/snes9x.so".into()));
    pull_from_file(cfg.path(), &mut prefs).expect("pull");

    assert_eq!(
        prefs.get("video_refresh_rate"),
        Some(PrefValue::String("59.94".into()))
    );
    assert!(!prefs.contains("audio_latency"));
    assert!(prefs.contains("libretro_path"));
}

#[test]
fn uncoercible_value_is_treated_as_absent() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let cfg = dir.child("retroarch.cfg");
    cfg.write_str("video_vsync = \"sometimes\"\ninput_overlay_opacity = \"opaque\"\n")
        .expect("write");

    let mut prefs = MemoryPreferences::new()
        .with("video_vsync", PrefValue::Bool(true))
        .with("input_overlay_opacity", PrefValue::Float(0.5));
    pull_from_file(cfg.path(), &mut prefs).expect("pull");

    assert!(!prefs.contains("video_vsync"));
    assert!(!prefs.contains("input_overlay_opacity"));
}

#[test]
fn missing_file_is_a_silent_no_op() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let cfg = dir.child("retroarch.cfg");

    let mut prefs = MemoryPreferences::new().with("video_vsync", PrefValue::Bool(false));
    let outcome = pull_from_file(cfg.path(), &mut prefs).expect("pull");

    assert!(matches!(outcome, PullOutcome::Skipped { .. }));
    assert_eq!(prefs.get("video_vsync"), Some(PrefValue::Bool(false)));
}

#[test]
fn stray_line_does_not_hide_other_keys() {
    init_logging();
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let cfg = dir.child("retroarch.cfg");
    cfg.write_str("video_vsync = true\n<<garbage>>\n").expect("write");

    let mut prefs = MemoryPreferences::new().with("video_vsync", PrefValue::Bool(false));
    let outcome = pull_from_file(cfg.path(), &mut prefs).expect("pull");

    assert!(matches!(outcome, PullOutcome::Applied { copied: 1, .. }), "got: {outcome:?}");
    assert_eq!(prefs.get("video_vsync"), Some(PrefValue::Bool(true)));
}

#[test]
fn non_utf8_file_is_a_silent_no_op() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let cfg = dir.child("retroarch.cfg");
    cfg.write_binary(b"video_vsync = true\n\xff\xfe\n").expect("write");

    let mut prefs = MemoryPreferences::new().with("video_vsync", PrefValue::Bool(false));
    let outcome = pull_from_file(cfg.path(), &mut prefs).expect("pull");

    assert!(matches!(outcome, PullOutcome::Skipped { .. }));
    assert_eq!(prefs.get("video_vsync"), Some(PrefValue::Bool(false)));
}

#[test]
fn pull_commits_to_persistent_store() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let cfg = dir.child("retroarch.cfg");
    cfg.write_str("rewind_enable = true\n").expect("write");
    let prefs_path = dir.child("prefs.json");

    let mut prefs = FilePreferences::load_at(prefs_path.path()).expect("load");
    pull_from_file(cfg.path(), &mut prefs).expect("pull");

    let reloaded = FilePreferences::load_at(prefs_path.path()).expect("reload");
    assert!(reloaded.get_bool("rewind_enable", false));
    assert_eq!(reloaded.values().len(), 1);
}
