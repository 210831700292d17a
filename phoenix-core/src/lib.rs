//! Phoenix core library: preference values, the key=value config document,
//! and errors.
//!
//! Public API surface:
//! - [`prefs`]: [`PrefValue`], the [`PreferenceStore`] trait, batch editing
//! - [`document`]: [`ConfigDocument`] parse / serialize / atomic save
//! - [`error`]: [`CoreError`]

pub mod document;
pub mod error;
pub mod prefs;

pub use document::{ConfigDocument, ConfigValue};
pub use error::CoreError;
pub use prefs::{
    FilePreferences, MemoryPreferences, PrefEdit, PrefValue, PreferenceEditor, PreferenceStore,
};
