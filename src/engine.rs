//! Localization engine: dictionary, active locale and render pass together.

use serde_json::Value;
use thiserror::Error;

use crate::config::{
    BindingConfig,
    EngineSettings,
};
use crate::dictionary::{
    CoverageReport,
    Dictionary,
    DictionaryError,
    DictionaryStore,
    check_coverage,
};
use crate::locale::{
    LocaleError,
    LocaleState,
    PreferenceStore,
};
use crate::render::{
    RenderReport,
    UiTree,
    render_pass,
};
use crate::types::Locale;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Locale(#[from] LocaleError),

    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}

/// One localization context, owned by the application's composition root.
///
/// Instances share nothing, so several engines (or tests) can run side by
/// side. All operations are synchronous; mutation needs `&mut self`, which
/// rules out overlapping locale switches.
#[derive(Debug)]
pub struct LocalizationEngine<S> {
    dictionary: DictionaryStore,
    locale: LocaleState<S>,
    bindings: BindingConfig,
}

impl<S: PreferenceStore> LocalizationEngine<S> {
    /// Create an engine with an empty dictionary.
    ///
    /// The active locale is restored from `store`.
    pub fn new(settings: &EngineSettings, store: S) -> Result<Self, EngineError> {
        let locale = LocaleState::from_settings(settings, store)?;

        Ok(Self { dictionary: DictionaryStore::new(), locale, bindings: settings.bindings.clone() })
    }

    #[must_use]
    pub fn with_dictionary(mut self, dictionary: Dictionary) -> Self {
        self.replace_dictionary(dictionary);
        self
    }

    /// Validate and swap in a `{locale: {key: string}}` value.
    ///
    /// On error the current dictionary is kept.
    pub fn load_dictionary(&mut self, data: &Value) -> Result<(), EngineError> {
        self.dictionary.load(data)?;
        self.coverage().log();
        Ok(())
    }

    pub fn replace_dictionary(&mut self, dictionary: Dictionary) {
        self.dictionary.replace(dictionary);
        self.coverage().log();
    }

    /// Gaps of every supported locale against the default locale.
    #[must_use]
    pub fn coverage(&self) -> CoverageReport {
        check_coverage(
            self.dictionary.dictionary(),
            self.locale.supported(),
            self.locale.default_locale(),
        )
    }

    #[must_use]
    pub const fn dictionary(&self) -> &Dictionary {
        self.dictionary.dictionary()
    }

    /// Translation of `key` in the active locale.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.dictionary.lookup(self.locale.current().as_str(), key)
    }

    #[must_use]
    pub fn lookup_in(&self, locale: &str, key: &str) -> Option<&str> {
        self.dictionary.lookup(locale, key)
    }

    #[must_use]
    pub fn current_locale(&self) -> &Locale {
        self.locale.current()
    }

    #[must_use]
    pub fn supported_locales(&self) -> &[Locale] {
        self.locale.supported()
    }

    #[must_use]
    pub const fn preferences(&self) -> &S {
        self.locale.store()
    }

    /// Sync `tree` with the active locale.
    pub fn render<T>(&self, tree: &mut T) -> RenderReport
    where
        T: UiTree + ?Sized,
    {
        render_pass(tree, self.dictionary.dictionary(), self.locale.current(), &self.bindings)
    }

    /// Switch locale, persist it best-effort, then re-render `tree` in full.
    ///
    /// # Errors
    /// `EngineError::Locale` for an unsupported locale; neither the engine
    /// nor `tree` is modified.
    pub fn set_current<T>(&mut self, locale: &str, tree: &mut T) -> Result<RenderReport, EngineError>
    where
        T: UiTree + ?Sized,
    {
        self.locale.set_current(locale)?;
        Ok(self.render(tree))
    }
}
