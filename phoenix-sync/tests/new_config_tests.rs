//! Save-new-config integration tests.

use assert_fs::prelude::*;
use phoenix_core::ConfigDocument;
use phoenix_platform::SystemFiles;
use phoenix_sync::{save_new_config, SyncError};
use predicates::prelude::predicate;

#[test]
fn saves_under_core_name_and_avoids_collisions() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let cores = dir.child("cores");
    cores.create_dir_all().expect("mkdir");
    let core = cores.child("snes9x_libretro.so");
    core.write_binary(b"\x7fELF").expect("write core");
    let cfg_dir = dir.child("config");
    cfg_dir.create_dir_all().expect("mkdir");

    let mut doc = ConfigDocument::new();
    doc.set_bool("video_vsync", false);
    let core_path = core.path().to_string_lossy().into_owned();

    let first = save_new_config(Some(cfg_dir.path()), None, &core_path, &doc, &SystemFiles)
        .expect("first save");
    assert_eq!(first, cfg_dir.child("snes9x_libretro.cfg").path());

    let second = save_new_config(Some(cfg_dir.path()), None, &core_path, &doc, &SystemFiles)
        .expect("second save");
    assert_eq!(second, cfg_dir.child("snes9x_libretro-1.cfg").path());
    cfg_dir
        .child("snes9x_libretro-1.cfg")
        .assert(predicate::str::contains("video_vsync = false"));
}

#[test]
fn falls_back_to_current_config_directory() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let current = dir.child("retroarch.cfg");

    let path = save_new_config(None, Some(current.path()), "", &ConfigDocument::new(), &SystemFiles)
        .expect("save");
    assert_eq!(path.parent(), Some(dir.path()));
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("RetroArch-"), "got: {name}");
    assert!(path.exists());
}

#[test]
fn no_directory_is_an_error() {
    let err = save_new_config(None, None, "", &ConfigDocument::new(), &SystemFiles).unwrap_err();
    assert!(matches!(err, SyncError::NoConfigDirectory), "got: {err}");
}
