//! The line-oriented `key = value` config document consumed by the emulator.
//!
//! # Text format
//!
//! ```text
//! # comment lines and blank lines are skipped
//! libretro_path = "/data/app/lib/libretro_snes9x.so"
//! video_vsync = true
//! audio_out_rate = 48000
//! video_refresh_rate = 59.95
//! ```
//!
//! Quoted values are strings. Unquoted `true`/`false` are booleans, unquoted
//! integers are ints, unquoted decimals are doubles; any other unquoted token
//! is kept as a string. Only the first token of an unquoted value counts, and
//! a quoted value ends at the last `"` on its line, so quotes inside a string
//! need no escaping. Lines that fit none of these shapes are skipped with a
//! warning. Keys are matched case-sensitively. Entries keep their
//! insertion order, so keys this crate never touches survive a
//! load → modify → save cycle unchanged.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{io_err, CoreError};

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// A typed config value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Bool(bool),
    Int(i64),
    Double(f64),
}

impl ConfigValue {
    fn kind(&self) -> &'static str {
        match self {
            ConfigValue::String(_) => "a string",
            ConfigValue::Bool(_) => "a bool",
            ConfigValue::Int(_) => "an int",
            ConfigValue::Double(_) => "a double",
        }
    }

    /// Classify an unquoted token.
    fn from_bare(token: &str) -> Self {
        match token {
            "true" => return ConfigValue::Bool(true),
            "false" => return ConfigValue::Bool(false),
            _ => {}
        }
        if let Ok(i) = token.parse::<i64>() {
            return ConfigValue::Int(i);
        }
        if token.bytes().any(|b| b.is_ascii_digit()) {
            if let Ok(d) = token.parse::<f64>() {
                return ConfigValue::Double(d);
            }
        }
        ConfigValue::String(token.to_owned())
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::String(s) => write!(f, "\"{s}\""),
            ConfigValue::Bool(b) => write!(f, "{b}"),
            ConfigValue::Int(i) => write!(f, "{i}"),
            ConfigValue::Double(d) => f.write_str(&format_double(*d)),
        }
    }
}

/// Doubles always carry a decimal point so they read back as doubles.
fn format_double(d: f64) -> String {
    let s = d.to_string();
    if !d.is_finite() || s.contains(['.', 'e', 'E']) {
        s
    } else {
        format!("{s}.0")
    }
}

/// Split one non-comment line. A quoted value runs to the last `"` on the
/// line; an unquoted value is its first whitespace-separated token.
fn parse_line(line: &str) -> Result<(&str, ConfigValue), &'static str> {
    let (key, value) = line.split_once('=').ok_or("expected `key = value`")?;
    let key = key.trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return Err("invalid key");
    }
    let value = value.trim();
    let value = match value.strip_prefix('"') {
        Some(rest) => {
            let end = rest.rfind('"').ok_or("unterminated string")?;
            ConfigValue::String(rest[..end].to_owned())
        }
        None => ConfigValue::from_bare(value.split_whitespace().next().unwrap_or_default()),
    };
    Ok((key, value))
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// An ordered, case-sensitive key → [`ConfigValue`] map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    entries: Vec<(String, ConfigValue)>,
}

impl ConfigDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse config text. A repeated key keeps its first position and its
    /// last value. Lines that are not `key = value` are skipped with a
    /// warning.
    pub fn parse(text: &str) -> Self {
        let mut doc = Self::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match parse_line(line) {
                Ok((key, value)) => doc.set(key, value),
                Err(reason) => tracing::warn!("skipping config line {}: {reason}", idx + 1),
            }
        }
        doc
    }

    /// Load and parse the document at `path`. Only reading can fail; a file
    /// that is not UTF-8 surfaces as [`CoreError::Io`].
    pub fn load_at(path: &Path) -> Result<Self, CoreError> {
        let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        Ok(Self::parse(&contents))
    }

    /// Load `path`, or start empty when the file is missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("no config at {}; starting empty", path.display());
            return Self::new();
        }
        match Self::load_at(path) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!("ignoring unreadable config: {e}");
                Self::new()
            }
        }
    }

    // -- lookup -------------------------------------------------------------

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    pub fn key_exists(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    fn require(&self, key: &str) -> Result<&ConfigValue, CoreError> {
        self.get(key).ok_or_else(|| CoreError::MissingKey {
            key: key.to_owned(),
        })
    }

    fn mismatch(key: &str, expected: &'static str, found: &ConfigValue) -> CoreError {
        CoreError::TypeMismatch {
            key: key.to_owned(),
            expected,
            found: found.kind().to_owned(),
        }
    }

    /// Any value reads as a string; non-strings use their textual form.
    pub fn get_string(&self, key: &str) -> Result<String, CoreError> {
        Ok(match self.require(key)? {
            ConfigValue::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, CoreError> {
        match self.require(key)? {
            ConfigValue::Bool(b) => Ok(*b),
            ConfigValue::Int(1) => Ok(true),
            ConfigValue::Int(0) => Ok(false),
            ConfigValue::String(s) if s == "true" || s == "1" => Ok(true),
            ConfigValue::String(s) if s == "false" || s == "0" => Ok(false),
            other => Err(Self::mismatch(key, "a bool", other)),
        }
    }

    pub fn get_int(&self, key: &str) -> Result<i64, CoreError> {
        match self.require(key)? {
            ConfigValue::Int(i) => Ok(*i),
            ConfigValue::String(s) => s.trim().parse().map_err(|_| {
                Self::mismatch(key, "an int", &ConfigValue::String(s.clone()))
            }),
            other => Err(Self::mismatch(key, "an int", other)),
        }
    }

    pub fn get_double(&self, key: &str) -> Result<f64, CoreError> {
        match self.require(key)? {
            ConfigValue::Double(d) => Ok(*d),
            ConfigValue::Int(i) => Ok(*i as f64),
            ConfigValue::String(s) => s.trim().parse().map_err(|_| {
                Self::mismatch(key, "a double", &ConfigValue::String(s.clone()))
            }),
            other => Err(Self::mismatch(key, "a double", other)),
        }
    }

    // -- mutation -----------------------------------------------------------

    /// Overwrite in place, or append when the key is new.
    pub fn set(&mut self, key: &str, value: ConfigValue) {
        match self.position(key) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((key.to_owned(), value)),
        }
    }

    pub fn set_string(&mut self, key: &str, value: impl Into<String>) {
        self.set(key, ConfigValue::String(value.into()));
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.set(key, ConfigValue::Bool(value));
    }

    pub fn set_int(&mut self, key: &str, value: i64) {
        self.set(key, ConfigValue::Int(value));
    }

    pub fn set_double(&mut self, key: &str, value: f64) {
        self.set(key, ConfigValue::Double(value));
    }

    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.position(key).map(|i| self.entries.remove(i).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // -- output -------------------------------------------------------------

    /// Serialize every entry, in order, one `key = value` line each.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Atomically write the document to `path`.
    ///
    /// Write flow: serialize → `<name>.tmp` sibling → `rename`. The temp file
    /// lives in the target directory so the rename never crosses filesystems.
    pub fn save_at(&self, path: &Path) -> Result<(), CoreError> {
        let tmp = tmp_path(path);
        std::fs::write(&tmp, self.to_text()).map_err(|e| io_err(&tmp, e))?;
        if let Err(e) = std::fs::rename(&tmp, path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(io_err(path, e));
        }
        Ok(())
    }
}

impl fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.entries {
            writeln!(f, "{key} = {value}")?;
        }
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_classifies_values() {
        let doc = ConfigDocument::parse(
            "a = \"text\"\nb = true\nc = 48000\nd = 59.95\ne = -1.0\nf = nul\n",
        );
        assert_eq!(doc.get("a"), Some(&ConfigValue::String("text".into())));
        assert_eq!(doc.get("b"), Some(&ConfigValue::Bool(true)));
        assert_eq!(doc.get("c"), Some(&ConfigValue::Int(48000)));
        assert_eq!(doc.get("d"), Some(&ConfigValue::Double(59.95)));
        assert_eq!(doc.get("e"), Some(&ConfigValue::Double(-1.0)));
        assert_eq!(doc.get("f"), Some(&ConfigValue::String("nul".into())));
    }

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let doc = ConfigDocument::parse("# header\n\n   \nvideo_vsync = false\n");
        assert_eq!(doc.len(), 1);
        assert!(!doc.get_bool("video_vsync").unwrap());
    }

    #[test]
    fn parse_keeps_equals_inside_quotes() {
        let doc = ConfigDocument::parse("video_shader = \"/a=b/c.glsl\"");
        assert_eq!(doc.get_string("video_shader").unwrap(), "/a=b/c.glsl");
    }

    #[test]
    fn parse_skips_malformed_lines() {
        let doc = ConfigDocument::parse(
            "ok = 1\nbroken line\nbad key = 2\n= 3\n\
             input_overlay = \"/sdcard/x.cfg\nlast = true\n",
        );
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["ok", "last"]);
    }

    #[test]
    fn quoted_value_runs_to_last_quote() {
        let doc = ConfigDocument::parse("rgui_browser_directory = \"/sdcard/my \"roms\"\"\n");
        assert_eq!(
            doc.get_string("rgui_browser_directory").unwrap(),
            "/sdcard/my \"roms\""
        );
    }

    #[test]
    fn string_with_quotes_survives_serialize_and_parse() {
        let mut doc = ConfigDocument::new();
        doc.set_string("savefile_directory", "/sdcard/\"saves\" dir");
        doc.set_bool("video_vsync", true);
        assert_eq!(ConfigDocument::parse(&doc.to_text()), doc);
    }

    #[test]
    fn unquoted_value_keeps_first_token() {
        let doc = ConfigDocument::parse("a = foo bar\nb = 64 # latency\nc =\n");
        assert_eq!(doc.get("a"), Some(&ConfigValue::String("foo".into())));
        assert_eq!(doc.get("b"), Some(&ConfigValue::Int(64)));
        assert_eq!(doc.get("c"), Some(&ConfigValue::String(String::new())));
    }

    #[test]
    fn duplicate_key_keeps_first_position_and_last_value() {
        let doc = ConfigDocument::parse("a = 1\nb = 2\na = 3\n");
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(doc.get_int("a").unwrap(), 3);
    }

    #[test]
    fn keys_are_case_sensitive() {
        let doc = ConfigDocument::parse("Video_Vsync = true");
        assert!(!doc.key_exists("video_vsync"));
        assert!(matches!(
            doc.get_bool("video_vsync"),
            Err(CoreError::MissingKey { .. })
        ));
    }

    #[test]
    fn getters_coerce_compatible_values() {
        let doc = ConfigDocument::parse("a = \"1\"\nb = 2\nc = \"0.5\"\nd = 7");
        assert!(doc.get_bool("a").unwrap());
        assert_eq!(doc.get_double("b").unwrap(), 2.0);
        assert_eq!(doc.get_double("c").unwrap(), 0.5);
        assert_eq!(doc.get_string("d").unwrap(), "7");
    }

    #[test]
    fn getters_reject_incompatible_values() {
        let doc = ConfigDocument::parse("a = \"maybe\"\nb = true");
        assert!(matches!(
            doc.get_bool("a"),
            Err(CoreError::TypeMismatch { expected: "a bool", .. })
        ));
        assert!(doc.get_double("b").is_err());
    }

    #[test]
    fn serialize_writes_natural_forms_in_order() {
        let mut doc = ConfigDocument::new();
        doc.set_string("libretro_path", "/lib/core.so");
        doc.set_bool("video_vsync", true);
        doc.set_int("audio_latency", 64);
        doc.set_double("video_aspect_ratio", -1.0);
        doc.set_double("video_refresh_rate", 59.95);
        assert_eq!(
            doc.to_text(),
            "libretro_path = \"/lib/core.so\"\n\
             video_vsync = true\n\
             audio_latency = 64\n\
             video_aspect_ratio = -1.0\n\
             video_refresh_rate = 59.95\n"
        );
    }

    #[test]
    fn set_overwrites_in_place() {
        let mut doc = ConfigDocument::parse("a = 1\nb = 2\n");
        doc.set_string("a", "x");
        assert_eq!(doc.to_text(), "a = \"x\"\nb = 2\n");
    }

    #[test]
    fn remove_drops_entry() {
        let mut doc = ConfigDocument::parse("a = 1\nb = 2\n");
        assert_eq!(doc.remove("a"), Some(ConfigValue::Int(1)));
        assert_eq!(doc.remove("a"), None);
        assert_eq!(doc.len(), 1);
    }
}
