//! Dictionary data and its atomically replaced holder.

use std::collections::HashMap;

use jsonc_parser::ParseOptions;
use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

use crate::types::{
    Locale,
    TranslationKey,
};

/// Key to display string table of a single locale.
pub type LocaleEntries = HashMap<TranslationKey, String>;

#[derive(Error, Debug)]
pub enum DictionaryError {
    /// The data is not a `{locale: {key: string}}` mapping.
    #[error("Malformed dictionary at '{location}': {message}")]
    Malformed { location: String, message: String },

    #[error("Failed to parse dictionary: {0}")]
    Parse(String),

    #[error("Failed to read dictionary file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl DictionaryError {
    fn malformed(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed { location: location.into(), message: message.into() }
    }
}

/// Per-locale translation tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    locales: HashMap<Locale, LocaleEntries>,
}

impl Dictionary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a `{locale: {key: string}}` JSON value.
    ///
    /// # Errors
    /// `DictionaryError::Malformed` when the top level or any locale entry is
    /// not a flat string-to-string object.
    pub fn from_value(value: &Value) -> Result<Self, DictionaryError> {
        let Value::Object(root) = value else {
            return Err(DictionaryError::malformed(
                "$",
                format!("expected an object of locales, found {}", kind_of(value)),
            ));
        };

        let mut locales = HashMap::with_capacity(root.len());
        for (code, table) in root {
            if code.trim().is_empty() {
                return Err(DictionaryError::malformed("$", "locale code cannot be empty"));
            }
            let entries = entries_from_value(code, table)?;
            locales.insert(Locale::new(code.clone()), entries);
        }

        Ok(Self { locales })
    }

    /// Parse JSON text; comments and trailing commas are accepted.
    pub fn from_json_str(text: &str) -> Result<Self, DictionaryError> {
        let value = parse_json(text)?;
        Self::from_value(&value)
    }

    /// The mapped string, or `None` for an unknown locale or absent key.
    #[must_use]
    pub fn lookup(&self, locale: &str, key: &str) -> Option<&str> {
        self.locales.get(locale)?.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn entries(&self, locale: &str) -> Option<&LocaleEntries> {
        self.locales.get(locale)
    }

    #[must_use]
    pub fn contains_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Locales in sorted order.
    #[must_use]
    pub fn locales(&self) -> Vec<&Locale> {
        let mut locales: Vec<_> = self.locales.keys().collect();
        locales.sort();
        locales
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

impl FromIterator<(Locale, LocaleEntries)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (Locale, LocaleEntries)>>(iter: I) -> Self {
        Self { locales: iter.into_iter().collect() }
    }
}

/// Validate one locale table. `location` is used in error messages.
pub(super) fn entries_from_value(
    location: &str,
    value: &Value,
) -> Result<LocaleEntries, DictionaryError> {
    let Value::Object(table) = value else {
        return Err(DictionaryError::malformed(
            location,
            format!("expected an object of key/value strings, found {}", kind_of(value)),
        ));
    };

    entries_from_map(location, table)
}

fn entries_from_map(
    location: &str,
    table: &Map<String, Value>,
) -> Result<LocaleEntries, DictionaryError> {
    let mut entries = HashMap::with_capacity(table.len());
    for (key, text) in table {
        let Value::String(text) = text else {
            return Err(DictionaryError::malformed(
                format!("{location}.{key}"),
                format!("expected a string, found {}", kind_of(text)),
            ));
        };
        entries.insert(TranslationKey::new(key.clone()), text.clone());
    }
    Ok(entries)
}

pub(super) fn parse_json(text: &str) -> Result<Value, DictionaryError> {
    jsonc_parser::parse_to_serde_value(text, &ParseOptions::default())
        .map_err(|e| DictionaryError::Parse(e.to_string()))?
        .ok_or_else(|| DictionaryError::Parse("document is empty".to_string()))
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Holds the current dictionary; reloads replace it wholesale.
#[derive(Debug, Clone, Default)]
pub struct DictionaryStore {
    dictionary: Dictionary,
}

impl DictionaryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `data` and swap it in. On error the previous dictionary stays.
    pub fn load(&mut self, data: &Value) -> Result<(), DictionaryError> {
        let dictionary = Dictionary::from_value(data)?;
        self.replace(dictionary);
        Ok(())
    }

    pub fn replace(&mut self, dictionary: Dictionary) {
        tracing::debug!(locales = dictionary.locales.len(), "Dictionary replaced");
        self.dictionary = dictionary;
    }

    #[must_use]
    pub fn lookup(&self, locale: &str, key: &str) -> Option<&str> {
        self.dictionary.lookup(locale, key)
    }

    #[must_use]
    pub const fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }
}
