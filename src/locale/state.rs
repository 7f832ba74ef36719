//! Active Locale State.

use thiserror::Error;

use super::persistence::PreferenceStore;
use crate::config::EngineSettings;
use crate::types::Locale;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    /// The requested locale is not in the supported set.
    #[error("Unsupported locale '{requested}' (supported: {})", join_locales(.supported))]
    Unsupported { requested: String, supported: Vec<Locale> },

    #[error("No supported locales configured")]
    NoSupportedLocales,

    #[error("Default locale '{0}' is not supported")]
    DefaultNotSupported(Locale),
}

fn join_locales(locales: &[Locale]) -> String {
    locales.iter().map(Locale::as_str).collect::<Vec<_>>().join(", ")
}

/// The current locale plus the store it is persisted to.
///
/// Only `set_current` changes the locale after initialization, and it swaps
/// the value in one assignment.
#[derive(Debug)]
pub struct LocaleState<S> {
    supported: Vec<Locale>,
    default: Locale,
    current: Option<Locale>,
    store: S,
    storage_key: String,
}

impl<S: PreferenceStore> LocaleState<S> {
    /// Build the state and restore the persisted preference.
    ///
    /// An absent, unreadable or unsupported preference falls back to the
    /// default locale without error.
    ///
    /// # Errors
    /// - `supported` is empty
    /// - `default` is not in `supported`
    pub fn initialize(
        supported: Vec<Locale>,
        default: Option<Locale>,
        store: S,
        storage_key: impl Into<String>,
    ) -> Result<Self, LocaleError> {
        let default = match default {
            Some(default) if supported.contains(&default) => default,
            Some(default) => return Err(LocaleError::DefaultNotSupported(default)),
            None => supported.first().cloned().ok_or(LocaleError::NoSupportedLocales)?,
        };

        let mut state =
            Self { supported, default, current: None, store, storage_key: storage_key.into() };
        state.current = state.restore();
        tracing::debug!(locale = %state.current(), "Locale state initialized");

        Ok(state)
    }

    pub fn from_settings(settings: &EngineSettings, store: S) -> Result<Self, LocaleError> {
        Self::initialize(
            settings.supported_locales.clone(),
            settings.default_locale.clone(),
            store,
            settings.storage_key.clone(),
        )
    }

    fn restore(&self) -> Option<Locale> {
        let stored = match self.store.read(&self.storage_key) {
            Ok(stored) => stored?,
            Err(err) => {
                tracing::warn!("Failed to read locale preference, using default: {err}");
                return None;
            }
        };

        let restored = self.find_supported(&stored);
        if restored.is_none() {
            tracing::debug!("Ignoring unsupported persisted locale '{stored}'");
        }
        restored
    }

    fn find_supported(&self, code: &str) -> Option<Locale> {
        self.supported.iter().find(|locale| locale.as_str() == code).cloned()
    }

    /// The selected locale, or the default if none was ever selected.
    #[must_use]
    pub fn current(&self) -> &Locale {
        self.current.as_ref().unwrap_or(&self.default)
    }

    #[must_use]
    pub const fn default_locale(&self) -> &Locale {
        &self.default
    }

    #[must_use]
    pub fn supported(&self) -> &[Locale] {
        &self.supported
    }

    /// Switch to `code` and persist it.
    ///
    /// Persistence is best-effort: a failed write is logged and the
    /// in-memory switch stands.
    ///
    /// # Errors
    /// `LocaleError::Unsupported` when `code` is not supported; the state is
    /// left unchanged.
    pub fn set_current(&mut self, code: &str) -> Result<&Locale, LocaleError> {
        let Some(locale) = self.find_supported(code) else {
            tracing::debug!("Rejected locale switch to '{code}'");
            return Err(LocaleError::Unsupported {
                requested: code.to_string(),
                supported: self.supported.clone(),
            });
        };

        if let Err(err) = self.store.write(&self.storage_key, locale.as_str()) {
            tracing::warn!(locale = %locale, "Failed to persist locale preference: {err}");
        }

        tracing::debug!(locale = %locale, "Active locale changed");
        Ok(&*self.current.insert(locale))
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::locale::MemoryPreferenceStore;
    use crate::test_utils::FailingPreferenceStore;

    fn locales(codes: &[&str]) -> Vec<Locale> {
        codes.iter().copied().map(Locale::new).collect()
    }

    fn state_with(store: MemoryPreferenceStore) -> LocaleState<MemoryPreferenceStore> {
        LocaleState::initialize(locales(&["en", "fr"]), None, store, "language").unwrap()
    }

    #[googletest::test]
    fn defaults_to_first_supported_locale() {
        let state = state_with(MemoryPreferenceStore::new());

        expect_that!(state.current().as_str(), eq("en"));
        expect_that!(state.default_locale().as_str(), eq("en"));
    }

    #[googletest::test]
    fn explicit_default_locale() {
        let state = LocaleState::initialize(
            locales(&["en", "fr"]),
            Some(Locale::new("fr")),
            MemoryPreferenceStore::new(),
            "language",
        )
        .unwrap();

        expect_that!(state.current().as_str(), eq("fr"));
    }

    #[rstest]
    #[case::supported("fr", "fr")]
    #[case::unsupported("de", "en")]
    #[case::wrong_case("FR", "en")]
    #[case::empty("", "en")]
    fn restores_persisted_preference(#[case] stored: &str, #[case] expected: &str) {
        let store = MemoryPreferenceStore::new().with_value("language", stored);

        let state = state_with(store);

        assert_eq!(state.current().as_str(), expected);
    }

    #[googletest::test]
    fn unreadable_preference_falls_back_to_default() {
        let state = LocaleState::initialize(
            locales(&["en", "fr"]),
            None,
            FailingPreferenceStore,
            "language",
        )
        .unwrap();

        expect_that!(state.current().as_str(), eq("en"));
    }

    #[rstest]
    fn initialize_rejects_invalid_configuration() {
        let empty =
            LocaleState::initialize(vec![], None, MemoryPreferenceStore::new(), "language");
        let bad_default = LocaleState::initialize(
            locales(&["en"]),
            Some(Locale::new("fr")),
            MemoryPreferenceStore::new(),
            "language",
        );

        assert_eq!(empty.unwrap_err(), LocaleError::NoSupportedLocales);
        assert_eq!(bad_default.unwrap_err(), LocaleError::DefaultNotSupported(Locale::new("fr")));
    }

    #[googletest::test]
    fn set_current_switches_and_persists() {
        let mut state = state_with(MemoryPreferenceStore::new());

        let selected = state.set_current("fr").unwrap().clone();

        expect_that!(selected.as_str(), eq("fr"));
        expect_that!(state.current().as_str(), eq("fr"));
        expect_that!(state.store().get("language"), some(eq("fr")));
    }

    #[googletest::test]
    fn set_current_rejects_unsupported_locale() {
        let mut state = state_with(MemoryPreferenceStore::new());
        state.set_current("fr").unwrap();

        let result = state.set_current("de");

        assert_eq!(
            result.unwrap_err(),
            LocaleError::Unsupported {
                requested: "de".to_string(),
                supported: locales(&["en", "fr"]),
            }
        );
        expect_that!(state.current().as_str(), eq("fr"));
        expect_that!(state.store().get("language"), some(eq("fr")));
    }

    #[googletest::test]
    fn persistence_failure_keeps_in_memory_switch() {
        let mut state = LocaleState::initialize(
            locales(&["en", "fr"]),
            None,
            FailingPreferenceStore,
            "language",
        )
        .unwrap();

        let result = state.set_current("fr");

        expect_that!(result.is_ok(), eq(true));
        expect_that!(state.current().as_str(), eq("fr"));
    }

    #[googletest::test]
    fn unsupported_error_lists_supported_locales() {
        let error = LocaleError::Unsupported {
            requested: "de".to_string(),
            supported: locales(&["en", "fr"]),
        };

        expect_that!(error.to_string(), eq("Unsupported locale 'de' (supported: en, fr)"));
    }
}
