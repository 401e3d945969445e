//! Formula → bookmark text lookup table
//!
//! Three tiers, consulted in order:
//! 1. custom entries from the mapping file plus everything learned this run
//! 2. session entries, remembered for this run only and never saved
//! 3. the built-in [`DEFAULT_MAPPINGS`]
//!
//! Only the custom tier is written back by [`MappingStore::save`].

use std::fs;
use std::io;
use std::path::Path;

use fxhash::FxHashMap;
use indexmap::IndexMap;

use crate::data::symbols::{lookup_default, DEFAULT_MAPPINGS};
use crate::utils::error::{FixError, FixResult};

/// Default mapping file name, relative to the working directory
pub const DEFAULT_MAPPING_FILE: &str = "math_mappings.json";

/// Layered formula mapping table
#[derive(Debug, Clone, Default)]
pub struct MappingStore {
    custom: IndexMap<String, String>,
    session: FxHashMap<String, String>,
    dirty: bool,
}

impl MappingStore {
    /// Store with only the built-in defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose custom tier starts with `entries`; not dirty
    pub fn with_custom<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            custom: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Self::default()
        }
    }

    /// Load custom entries from a JSON object file.
    ///
    /// A missing file yields an empty custom tier. Malformed JSON is an error:
    /// silently dropping the user's mappings would lose them on the next save.
    pub fn load(path: impl AsRef<Path>) -> FixResult<Self> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no mapping file at {}, starting empty", path.display());
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(FixError::MappingRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let custom: IndexMap<String, String> =
            serde_json::from_str(&text).map_err(|source| FixError::MappingLoad {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!(
            "loaded {} custom mappings from {}",
            custom.len(),
            path.display()
        );

        Ok(Self {
            custom,
            ..Self::default()
        })
    }

    /// Look up bookmark text for `formula` (delimiters excluded).
    ///
    /// `None` is the normal "unknown formula" outcome, not a failure.
    pub fn resolve(&self, formula: &str) -> Option<&str> {
        self.custom
            .get(formula)
            .or_else(|| self.session.get(formula))
            .map(String::as_str)
            .or_else(|| lookup_default(formula))
    }

    /// Insert or overwrite a custom entry; it will be saved
    pub fn learn(&mut self, formula: impl Into<String>, text: impl Into<String>) {
        let (formula, text) = (formula.into(), text.into());
        log::debug!("learned mapping ${}$ -> {}", formula, text);
        self.custom.insert(formula, text);
        self.dirty = true;
    }

    /// Remember text for the rest of this run without persisting it
    pub fn remember(&mut self, formula: impl Into<String>, text: impl Into<String>) {
        self.session.insert(formula.into(), text.into());
    }

    /// Whether any entry was learned since load or the last save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Custom tier in insertion order
    pub fn custom_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.custom.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Every effective mapping: defaults (with custom overrides applied),
    /// then custom-only keys, then session-only keys
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut out: Vec<(&str, &str)> = DEFAULT_MAPPINGS
            .entries()
            .map(|(&k, &v)| (k, self.custom.get(k).map(String::as_str).unwrap_or(v)))
            .collect();
        out.extend(
            self.custom
                .iter()
                .filter(|(k, _)| !DEFAULT_MAPPINGS.contains_key(k.as_str()))
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );
        out.extend(
            self.session
                .iter()
                .filter(|(k, _)| {
                    !self.custom.contains_key(k.as_str())
                        && !DEFAULT_MAPPINGS.contains_key(k.as_str())
                })
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );
        out
    }

    /// Write the custom tier to `path` if anything was learned.
    ///
    /// Returns `true` when the file was written.
    pub fn save(&mut self, path: impl AsRef<Path>) -> FixResult<bool> {
        if !self.dirty {
            return Ok(false);
        }
        let path = path.as_ref();
        let mut json = serde_json::to_string_pretty(&self.custom).map_err(FixError::MappingEncode)?;
        json.push('\n');
        fs::write(path, json).map_err(|source| FixError::MappingWrite {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!(
            "saved {} custom mappings to {}",
            self.custom.len(),
            path.display()
        );
        self.dirty = false;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults_resolve() {
        let store = MappingStore::new();
        assert_eq!(store.resolve("\\alpha"), Some("α"));
        assert_eq!(store.resolve("x^2"), Some("x²"));
        assert_eq!(store.resolve("\\unknown"), None);
    }

    #[test]
    fn test_custom_overrides_default() {
        let store = MappingStore::with_custom([("\\alpha", "alpha")]);
        assert_eq!(store.resolve("\\alpha"), Some("alpha"));
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_learn_marks_dirty_and_overwrites() {
        let mut store = MappingStore::new();
        store.learn("\\foo", "one");
        store.learn("\\foo", "two");
        assert!(store.is_dirty());
        assert_eq!(store.resolve("\\foo"), Some("two"));
        assert_eq!(store.custom_entries().count(), 1);
    }

    #[test]
    fn test_remember_is_not_dirty() {
        let mut store = MappingStore::new();
        store.remember("\\foo", "foo");
        assert_eq!(store.resolve("\\foo"), Some("foo"));
        assert!(!store.is_dirty());
        assert_eq!(store.custom_entries().count(), 0);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = MappingStore::load(dir.path().join("absent.json")).unwrap();
        assert_eq!(store.custom_entries().count(), 0);
        assert_eq!(store.resolve("\\beta"), Some("β"));
        assert!(!dir.path().join("absent.json").exists());
    }

    #[test]
    fn test_load_custom_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "m.json", r#"{"\\foo": "FOO", "\\alpha": "a"}"#);
        let store = MappingStore::load(&path).unwrap();
        assert_eq!(store.resolve("\\foo"), Some("FOO"));
        assert_eq!(store.resolve("\\alpha"), Some("a"));
        assert_eq!(store.resolve("\\beta"), Some("β"));
    }

    #[test]
    fn test_load_malformed_json_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "m.json", r#"{"\\foo": "FOO""#);
        let err = MappingStore::load(&path).unwrap_err();
        assert!(matches!(err, FixError::MappingLoad { .. }));
    }

    #[test]
    fn test_load_non_object_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "m.json", r#"["\\foo"]"#);
        assert!(matches!(
            MappingStore::load(&path),
            Err(FixError::MappingLoad { .. })
        ));

        let path = write(&dir, "n.json", r#"{"\\foo": 3}"#);
        assert!(matches!(
            MappingStore::load(&path),
            Err(FixError::MappingLoad { .. })
        ));
    }

    #[test]
    fn test_save_is_noop_when_clean() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.json");
        let mut store = MappingStore::new();
        assert!(!store.save(&path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_save_writes_custom_tier_only_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "m.json", r#"{"zeta": "z", "\\alpha": "a"}"#);
        let mut store = MappingStore::load(&path).unwrap();
        store.learn("\\foo", "φω");
        store.remember("\\bar", "bar");
        assert!(store.save(&path).unwrap());
        assert!(!store.is_dirty());

        let saved = fs::read_to_string(&path).unwrap();
        let parsed: IndexMap<String, String> = serde_json::from_str(&saved).unwrap();
        let keys: Vec<&str> = parsed.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "\\alpha", "\\foo"]);
        assert_eq!(parsed["\\foo"], "φω");
        // UTF-8 is written as-is, not escaped
        assert!(saved.contains("φω"));
    }

    #[test]
    fn test_entries_layering() {
        let mut store = MappingStore::with_custom([("\\alpha", "A"), ("\\foo", "F")]);
        store.remember("\\bar", "B");
        let entries = store.entries();
        assert_eq!(entries[0], ("\\alpha", "A"));
        assert!(entries.contains(&("\\foo", "F")));
        assert_eq!(entries.last(), Some(&("\\bar", "B")));
        assert_eq!(entries.len(), DEFAULT_MAPPINGS.len() + 2);
    }
}
