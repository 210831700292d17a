//! Preference store: the structured settings the front-end UI reads and writes.
//!
//! Values are tagged ([`PrefValue`]); typed getters check the tag at the
//! boundary and fall back to the caller's default on a miss or a tag mismatch.
//! Mutations go through a [`PreferenceEditor`] and land in the store as one
//! batch on [`PreferenceEditor::commit`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, CoreError};

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// A single stored preference value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PrefValue {
    String(String),
    Bool(bool),
    Int(i32),
    Float(f32),
}

impl PrefValue {
    /// Tag name, used in log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            PrefValue::String(_) => "string",
            PrefValue::Bool(_) => "bool",
            PrefValue::Int(_) => "int",
            PrefValue::Float(_) => "float",
        }
    }
}

/// One pending mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum PrefEdit {
    Put(String, PrefValue),
    Remove(String),
}

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

/// A mutable key → [`PrefValue`] mapping with default-on-miss reads.
pub trait PreferenceStore {
    /// Raw lookup; `None` when the key is absent.
    fn get(&self, key: &str) -> Option<PrefValue>;

    /// Apply a batch of edits as a unit.
    fn apply(&mut self, edits: Vec<PrefEdit>) -> Result<(), CoreError>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(PrefValue::String(s)) => s,
            other => fallback(key, other, "string", default.to_owned()),
        }
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(PrefValue::Bool(b)) => b,
            other => fallback(key, other, "bool", default),
        }
    }

    fn get_int(&self, key: &str, default: i32) -> i32 {
        match self.get(key) {
            Some(PrefValue::Int(i)) => i,
            other => fallback(key, other, "int", default),
        }
    }

    fn get_float(&self, key: &str, default: f32) -> f32 {
        match self.get(key) {
            Some(PrefValue::Float(f)) => f,
            other => fallback(key, other, "float", default),
        }
    }
}

fn fallback<T>(key: &str, found: Option<PrefValue>, expected: &str, default: T) -> T {
    if let Some(value) = found {
        tracing::warn!(
            "preference '{key}' holds a {} value, expected {expected}; using default",
            value.kind()
        );
    }
    default
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

/// Accumulates edits; nothing reaches the store until [`commit`](Self::commit).
#[derive(Debug, Default)]
pub struct PreferenceEditor {
    edits: Vec<PrefEdit>,
}

impl PreferenceEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, key: impl Into<String>, value: PrefValue) -> &mut Self {
        self.edits.push(PrefEdit::Put(key.into(), value));
        self
    }

    pub fn put_string(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.put(key, PrefValue::String(value.into()))
    }

    pub fn put_bool(&mut self, key: impl Into<String>, value: bool) -> &mut Self {
        self.put(key, PrefValue::Bool(value))
    }

    pub fn put_int(&mut self, key: impl Into<String>, value: i32) -> &mut Self {
        self.put(key, PrefValue::Int(value))
    }

    pub fn put_float(&mut self, key: impl Into<String>, value: f32) -> &mut Self {
        self.put(key, PrefValue::Float(value))
    }

    pub fn remove(&mut self, key: impl Into<String>) -> &mut Self {
        self.edits.push(PrefEdit::Remove(key.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Hand every pending edit to `store` in one [`PreferenceStore::apply`] call.
    pub fn commit<S: PreferenceStore + ?Sized>(self, store: &mut S) -> Result<(), CoreError> {
        store.apply(self.edits)
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Plain in-process store. Edits are applied in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryPreferences {
    values: BTreeMap<String, PrefValue>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures.
    pub fn with(mut self, key: impl Into<String>, value: PrefValue) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: PrefValue) {
        self.values.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PrefValue)> {
        self.values.iter()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<PrefValue> {
        self.values.get(key).cloned()
    }

    fn apply(&mut self, edits: Vec<PrefEdit>) -> Result<(), CoreError> {
        for edit in edits {
            match edit {
                PrefEdit::Put(key, value) => {
                    self.values.insert(key, value);
                }
                PrefEdit::Remove(key) => {
                    self.values.remove(&key);
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JSON-backed store
// ---------------------------------------------------------------------------

/// A [`MemoryPreferences`] persisted as JSON at a fixed path.
///
/// Every committed batch is saved with the `.tmp` + rename pattern, so a
/// crash mid-write leaves the previous file intact.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    values: MemoryPreferences,
}

impl FilePreferences {
    /// Load preferences from `path`; a missing file yields an empty store.
    pub fn load_at(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                values: MemoryPreferences::new(),
            });
        }
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        let values = serde_json::from_str(&contents).map_err(|e| CoreError::Json {
            path: path.clone(),
            source: e,
        })?;
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn values(&self) -> &MemoryPreferences {
        &self.values
    }

    /// Save atomically: `<path>.tmp` then rename.
    pub fn save(&self) -> Result<(), CoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
            }
        }
        let json = serde_json::to_string_pretty(&self.values).map_err(|e| CoreError::Json {
            path: self.path.clone(),
            source: e,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| io_err(&tmp, e))?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(io_err(&self.path, e));
        }
        Ok(())
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<PrefValue> {
        self.values.get(key)
    }

    fn apply(&mut self, edits: Vec<PrefEdit>) -> Result<(), CoreError> {
        let mut next = self.values.clone();
        next.apply(edits)?;
        let previous = std::mem::replace(&mut self.values, next);
        if let Err(e) = self.save() {
            self.values = previous;
            return Err(e);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
