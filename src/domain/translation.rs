//! Translation table for question text references
//!
//! Locale sources are flat JSON objects. Keys containing `@` describe a
//! string (placeholders, descriptions) rather than translate it and are
//! not loaded. Lookups never fail: unknown references resolve to themselves.

use crate::error::Result;
use std::collections::HashMap;

const REFERENCE_MARKER: char = '@';

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    entries: HashMap<String, String>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load entries from one locale source, overriding existing keys.
    ///
    /// Returns the number of entries loaded. Non-string values are skipped.
    pub fn load_json(&mut self, json: &str) -> Result<usize> {
        let source: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;

        let mut loaded = 0;
        for (key, value) in source {
            if key.contains(REFERENCE_MARKER) {
                continue;
            }
            if let serde_json::Value::String(text) = value {
                self.entries.insert(key, text);
                loaded += 1;
            }
        }

        Ok(loaded)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a text reference to its display string.
    ///
    /// # Examples
    ///
    /// ```
    /// use taginfo_gen::domain::TranslationTable;
    ///
    /// let mut table = TranslationTable::new();
    /// table.insert("questionBench", "Is there a bench?");
    /// assert_eq!(table.resolve("@questionBench"), "Is there a bench?");
    /// assert_eq!(table.resolve("Literal text"), "Literal text");
    /// ```
    pub fn resolve<'a>(&'a self, text_ref: &'a str) -> &'a str {
        let key = text_ref.strip_prefix(REFERENCE_MARKER).unwrap_or(text_ref);
        self.entries
            .get(key)
            .map(String::as_str)
            .unwrap_or(text_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARB: &str = r#"{
        "@@locale": "en",
        "questionBench": "Is there a bench?",
        "@questionBench": {"description": "Bench question"},
        "questionLevel": "Which level?",
        "count": 3
    }"#;

    #[test]
    fn test_load_skips_metadata_entries() {
        let mut table = TranslationTable::new();
        let loaded = table.load_json(ARB).unwrap();
        assert_eq!(loaded, 2);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_resolve_strips_marker() {
        let mut table = TranslationTable::new();
        table.load_json(ARB).unwrap();
        assert_eq!(table.resolve("@questionBench"), "Is there a bench?");
        assert_eq!(table.resolve("questionLevel"), "Which level?");
    }

    #[test]
    fn test_missing_reference_degrades_to_raw_text() {
        let table = TranslationTable::new();
        assert_eq!(table.resolve("@questionMissing"), "@questionMissing");
        assert_eq!(table.resolve("Is it lit?"), "Is it lit?");
    }

    #[test]
    fn test_metadata_key_is_never_a_translation() {
        let mut table = TranslationTable::new();
        table.load_json(ARB).unwrap();
        assert_eq!(table.resolve("@@locale"), "@@locale");
    }

    #[test]
    fn test_later_sources_override() {
        let mut table = TranslationTable::new();
        table.load_json(r#"{"q": "first", "r": "kept"}"#).unwrap();
        table.load_json(r#"{"q": "second"}"#).unwrap();
        assert_eq!(table.resolve("q"), "second");
        assert_eq!(table.resolve("r"), "kept");
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let mut table = TranslationTable::new();
        assert!(table.load_json("[1, 2]").is_err());
    }
}
