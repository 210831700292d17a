//! Config document load / save integration tests.

use assert_fs::prelude::*;
use phoenix_core::{ConfigDocument, ConfigValue, CoreError};
use predicates::prelude::predicate;
use rstest::rstest;

// ---------------------------------------------------------------------------
// 1. Load
// ---------------------------------------------------------------------------

#[test]
fn load_missing_file_is_io_error_with_path() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let path = dir.child("retroarch.cfg");
    let err = ConfigDocument::load_at(path.path()).unwrap_err();
    assert!(matches!(err, CoreError::Io { .. }), "got: {err}");
    assert!(err.to_string().contains("retroarch.cfg"));
}

#[test]
fn load_skips_stray_lines_and_keeps_the_rest() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("retroarch.cfg");
    file.write_str("custom_keymap = \"dvorak\"\nthis is not a setting\nvideo_vsync = true\n")
        .expect("write");

    let doc = ConfigDocument::load_at(file.path()).expect("load");
    assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["custom_keymap", "video_vsync"]);
    assert_eq!(doc.get_string("custom_keymap").unwrap(), "dvorak");
}

#[test]
fn load_non_utf8_file_is_io_error() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("retroarch.cfg");
    file.write_binary(b"video_vsync = \xff\xfe\n").expect("write");

    let err = ConfigDocument::load_at(file.path()).unwrap_err();
    assert!(matches!(err, CoreError::Io { .. }), "got: {err}");
    assert!(ConfigDocument::load_or_default(file.path()).is_empty());
}

#[rstest]
#[case::missing(None)]
#[case::only_garbage(Some("= = ="))]
#[case::only_unterminated(Some("input_overlay = \"/x"))]
fn load_or_default_starts_empty(#[case] contents: Option<&str>) {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("retroarch.cfg");
    if let Some(text) = contents {
        file.write_str(text).expect("write");
    }
    assert!(ConfigDocument::load_or_default(file.path()).is_empty());
}

// ---------------------------------------------------------------------------
// 2. Save
// ---------------------------------------------------------------------------

#[test]
fn save_then_load_preserves_unknown_keys_and_order() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("retroarch.cfg");
    file.write_str("custom_a = \"keep me\"\nvideo_vsync = false\ncustom_b = 3\n")
        .expect("write");

    let mut doc = ConfigDocument::load_at(file.path()).expect("load");
    doc.set_bool("video_vsync", true);
    doc.set_int("audio_latency", 64);
    doc.save_at(file.path()).expect("save");

    file.assert(
        "custom_a = \"keep me\"\nvideo_vsync = true\ncustom_b = 3\naudio_latency = 64\n",
    );
    let reloaded = ConfigDocument::load_at(file.path()).expect("reload");
    assert_eq!(reloaded.get("custom_b"), Some(&ConfigValue::Int(3)));
}

#[test]
fn save_cleans_up_tmp_file() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("retroarch.cfg");
    let mut doc = ConfigDocument::new();
    doc.set_string("rgui_browser_directory", "/sdcard");
    doc.save_at(file.path()).expect("save");

    file.assert(predicate::str::contains("rgui_browser_directory = \"/sdcard\""));
    dir.child("retroarch.cfg.tmp").assert(predicate::path::missing());
}

#[test]
fn save_into_missing_directory_fails_without_creating_it() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let target = dir.child("absent").child("retroarch.cfg");
    let err = ConfigDocument::new().save_at(target.path()).unwrap_err();
    assert!(matches!(err, CoreError::Io { .. }), "got: {err}");
    dir.child("absent").assert(predicate::path::missing());
}
