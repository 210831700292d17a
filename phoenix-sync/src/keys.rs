//! Key names shared by the preference store and the config document.
//!
//! Most settings use the same name on both sides.

pub const LIBRETRO_PATH: &str = "libretro_path";
pub const GLOBAL_CONFIG_ENABLE: &str = "global_config_enable";

pub const BROWSER_DIRECTORY: &str = "rgui_browser_directory";
pub const SAVEFILE_DIRECTORY: &str = "savefile_directory";
pub const SAVEFILE_DIRECTORY_ENABLE: &str = "savefile_directory_enable";
pub const SAVESTATE_DIRECTORY: &str = "savestate_directory";
pub const SAVESTATE_DIRECTORY_ENABLE: &str = "savestate_directory_enable";
pub const SYSTEM_DIRECTORY: &str = "system_directory";
pub const SYSTEM_DIRECTORY_ENABLE: &str = "system_directory_enable";
pub const GAME_HISTORY_PATH: &str = "game_history_path";

pub const AUDIO_RATE_CONTROL: &str = "audio_rate_control";
pub const AUDIO_ENABLE: &str = "audio_enable";
pub const AUDIO_OUT_RATE: &str = "audio_out_rate";
pub const AUDIO_LATENCY: &str = "audio_latency";
pub const AUDIO_LATENCY_AUTO: &str = "audio_latency_auto";
pub const AUDIO_BLOCK_FRAMES: &str = "audio_block_frames";

pub const VIDEO_SMOOTH: &str = "video_smooth";
pub const VIDEO_ALLOW_ROTATE: &str = "video_allow_rotate";
pub const VIDEO_VSYNC: &str = "video_vsync";
pub const VIDEO_THREADED: &str = "video_threaded";
pub const VIDEO_SCALE_INTEGER: &str = "video_scale_integer";
pub const VIDEO_FONT_ENABLE: &str = "video_font_enable";
pub const VIDEO_REFRESH_RATE: &str = "video_refresh_rate";
pub const VIDEO_ASPECT_RATIO: &str = "video_aspect_ratio";
pub const VIDEO_FORCE_ASPECT: &str = "video_force_aspect";
pub const VIDEO_FORCE_ASPECT_AUTO: &str = "video_force_aspect_auto";
pub const VIDEO_SHADER: &str = "video_shader";
pub const VIDEO_SHADER_ENABLE: &str = "video_shader_enable";

pub const SAVESTATE_AUTO_LOAD: &str = "savestate_auto_load";
pub const SAVESTATE_AUTO_SAVE: &str = "savestate_auto_save";
pub const REWIND_ENABLE: &str = "rewind_enable";

pub const INPUT_OVERLAY: &str = "input_overlay";
pub const INPUT_OVERLAY_ENABLE: &str = "input_overlay_enable";
pub const INPUT_OVERLAY_OPACITY: &str = "input_overlay_opacity";
pub const INPUT_AUTODETECT_ENABLE: &str = "input_autodetect_enable";
pub const INPUT_DEBUG_ENABLE: &str = "input_debug_enable";
pub const INPUT_BACK_BEHAVIOR: &str = "input_back_behavior";

/// Config keys for the four iCade pad profiles.
pub const ICADE_PROFILES: [&str; 4] = [
    "input_autodetect_icade_profile_pad1",
    "input_autodetect_icade_profile_pad2",
    "input_autodetect_icade_profile_pad3",
    "input_autodetect_icade_profile_pad4",
];

/// Preference keys the iCade profiles are read from.
///
/// Pad 1 reads the empty key, so it always takes the fallback. Kept as-is
/// until a product decision says otherwise.
pub const ICADE_PROFILE_PREFS: [&str; 4] = [
    "",
    "input_autodetect_icade_profile_pad2",
    "input_autodetect_icade_profile_pad3",
    "input_autodetect_icade_profile_pad4",
];

/// Players with a button map.
pub const PLAYERS: u8 = 4;

/// Button names in binding order.
pub const BUTTONS: [&str; 16] = [
    "up", "down", "left", "right", "a", "b", "x", "y", "start", "select", "l", "r", "l2", "r2",
    "l3", "r3",
];

/// `input_player{player}_{button}_btn`
pub fn player_button_key(player: u8, button: &str) -> String {
    format!("input_player{player}_{button}_btn")
}

/// How a pulled key is typed in the preference store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullKind {
    String,
    Bool,
    /// Read as a double from the config, stored as a float.
    Float,
}

/// Keys copied from the config back into preferences, in pull order.
pub const PULL_KEYS: &[(&str, PullKind)] = &[
    (BROWSER_DIRECTORY, PullKind::String),
    (SAVEFILE_DIRECTORY, PullKind::String),
    (SAVESTATE_DIRECTORY, PullKind::String),
    (SAVEFILE_DIRECTORY_ENABLE, PullKind::Bool),
    (SAVESTATE_DIRECTORY_ENABLE, PullKind::Bool),
    (INPUT_OVERLAY, PullKind::String),
    (INPUT_OVERLAY_ENABLE, PullKind::Bool),
    (VIDEO_SCALE_INTEGER, PullKind::Bool),
    (VIDEO_SMOOTH, PullKind::Bool),
    (VIDEO_THREADED, PullKind::Bool),
    (REWIND_ENABLE, PullKind::Bool),
    (SAVESTATE_AUTO_LOAD, PullKind::Bool),
    (SAVESTATE_AUTO_SAVE, PullKind::Bool),
    (AUDIO_RATE_CONTROL, PullKind::Bool),
    (AUDIO_ENABLE, PullKind::Bool),
    (INPUT_OVERLAY_OPACITY, PullKind::Float),
    (INPUT_AUTODETECT_ENABLE, PullKind::Bool),
    (VIDEO_ALLOW_ROTATE, PullKind::Bool),
    (VIDEO_FONT_ENABLE, PullKind::Bool),
    (VIDEO_VSYNC, PullKind::Bool),
];
