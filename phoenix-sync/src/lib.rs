//! # phoenix-sync
//!
//! Keeps the emulator's `retroarch.cfg` and the front-end preference store in
//! step.
//!
//! - [`PathResolver`] picks the one config path for the current storage
//!   layout and core selection.
//! - [`pull_from_file`] copies an allow-list of keys from the config into
//!   the preferences; keys missing from the file are removed.
//! - [`push_to_file`] writes the full managed key set, including values
//!   derived from audio and display queries, while keeping every key it does
//!   not manage.
//! - [`save_new_config`] writes a document under a fresh per-core name.

pub mod derive;
pub mod error;
pub mod keys;
pub mod new_config;
pub mod pull;
pub mod push;
pub mod resolver;
pub mod settings;

pub use derive::{AspectPolicy, AudioLatency};
pub use error::SyncError;
pub use new_config::{new_config_path, save_new_config};
pub use pull::{pull_from_file, PullOutcome};
pub use push::{apply_preferences, push_to_file, PushOutcome};
pub use resolver::{sanitize_core_name, ConfigFileName, PathResolver};
pub use settings::{PushConfig, ResolverConfig, SyncSettings};
