//! Core types used throughout the engine.

use std::borrow::Borrow;
use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

/// Identifier of one supported language (e.g. `"en"`, `"fr"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison that treats `-` and `_` as equal.
    ///
    /// `fr-CA`, `fr_ca` and `FR-ca` all match each other.
    #[must_use]
    pub fn matches_loosely(&self, code: &str) -> bool {
        normalize_locale_code(&self.0) == normalize_locale_code(code)
    }
}

/// Lowercase and replace `-` with `_`.
fn normalize_locale_code(code: &str) -> String {
    code.to_lowercase().replace('-', "_")
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl From<String> for Locale {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl Borrow<str> for Locale {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Opaque translation key, stable across locales.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationKey(String);

impl TranslationKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TranslationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TranslationKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for TranslationKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl Borrow<str> for TranslationKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TranslationKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
