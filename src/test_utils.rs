//! Shared fixtures for unit tests.
#![cfg(test)]

use serde_json::json;

use crate::dictionary::Dictionary;
use crate::locale::{
    PersistenceError,
    PreferenceStore,
};

/// Store whose reads and writes always fail.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FailingPreferenceStore;

impl PreferenceStore for FailingPreferenceStore {
    fn read(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
        Err(PersistenceError::Unavailable("storage disabled".to_string()))
    }

    fn write(&mut self, _key: &str, _value: &str) -> Result<(), PersistenceError> {
        Err(PersistenceError::Unavailable("storage disabled".to_string()))
    }
}

/// `en` with `hello` and `goodbye`, `fr` with `hello` only.
#[allow(clippy::unwrap_used)]
pub(crate) fn sample_dictionary() -> Dictionary {
    Dictionary::from_value(&json!({
        "en": { "hello": "Hello", "goodbye": "Goodbye" },
        "fr": { "hello": "Bonjour" }
    }))
    .unwrap()
}
