//! Key coverage of each locale against a reference locale.

use std::collections::{
    BTreeMap,
    BTreeSet,
};

use super::store::Dictionary;
use crate::types::{
    Locale,
    TranslationKey,
};

/// Gaps between the reference locale and the other supported locales.
///
/// Gaps are a data-quality concern only; lookups of missing keys keep
/// whatever the UI already displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageReport {
    pub reference: Option<Locale>,
    /// Keys defined by the reference but absent from a locale.
    pub missing: BTreeMap<Locale, Vec<TranslationKey>>,
    /// Keys defined by a locale but not by the reference.
    pub extra: BTreeMap<Locale, Vec<TranslationKey>>,
    /// Supported locales with no table at all.
    pub absent_locales: Vec<Locale>,
}

impl CoverageReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.absent_locales.is_empty()
    }

    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.missing.values().map(Vec::len).sum()
    }

    /// Emit one `warn` event per gap.
    pub fn log(&self) {
        for locale in &self.absent_locales {
            tracing::warn!(locale = %locale, "Supported locale has no dictionary entries");
        }
        for (locale, keys) in &self.missing {
            let keys: Vec<&str> = keys.iter().map(TranslationKey::as_str).collect();
            tracing::warn!(
                locale = %locale,
                count = keys.len(),
                "Missing translations: {}",
                keys.join(", ")
            );
        }
        for (locale, keys) in &self.extra {
            let keys: Vec<&str> = keys.iter().map(TranslationKey::as_str).collect();
            tracing::debug!(
                locale = %locale,
                "Keys not in the reference locale: {}",
                keys.join(", ")
            );
        }
    }
}

/// Compare every supported locale against `reference`.
///
/// When `reference` has no table, only `absent_locales` is filled in.
#[must_use]
pub fn check_coverage(
    dictionary: &Dictionary,
    supported: &[Locale],
    reference: &Locale,
) -> CoverageReport {
    let mut report =
        CoverageReport { reference: Some(reference.clone()), ..CoverageReport::default() };

    report.absent_locales = supported
        .iter()
        .filter(|locale| !dictionary.contains_locale(locale.as_str()))
        .cloned()
        .collect();

    let Some(reference_entries) = dictionary.entries(reference.as_str()) else {
        return report;
    };
    let reference_keys: BTreeSet<&TranslationKey> = reference_entries.keys().collect();

    for locale in supported.iter().filter(|locale| *locale != reference) {
        let Some(entries) = dictionary.entries(locale.as_str()) else {
            continue;
        };
        let keys: BTreeSet<&TranslationKey> = entries.keys().collect();

        let missing: Vec<TranslationKey> =
            reference_keys.difference(&keys).map(|key| (*key).clone()).collect();
        if !missing.is_empty() {
            report.missing.insert(locale.clone(), missing);
        }

        let extra: Vec<TranslationKey> =
            keys.difference(&reference_keys).map(|key| (*key).clone()).collect();
        if !extra.is_empty() {
            report.extra.insert(locale.clone(), extra);
        }
    }

    report
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use serde_json::json;

    use super::*;

    fn locales(codes: &[&str]) -> Vec<Locale> {
        codes.iter().copied().map(Locale::new).collect()
    }

    fn keys(names: &[&str]) -> Vec<TranslationKey> {
        names.iter().copied().map(TranslationKey::new).collect()
    }

    #[googletest::test]
    fn complete_dictionary_has_no_gaps() {
        let dictionary = Dictionary::from_value(&json!({
            "en": { "hello": "Hello" },
            "fr": { "hello": "Bonjour" }
        }))
        .unwrap();

        let report = check_coverage(&dictionary, &locales(&["en", "fr"]), &Locale::new("en"));

        expect_that!(report.is_complete(), eq(true));
        expect_that!(report.missing_count(), eq(0));
        expect_that!(report.extra.is_empty(), eq(true));
    }

    #[googletest::test]
    fn reports_missing_and_extra_keys() {
        let dictionary = Dictionary::from_value(&json!({
            "en": { "hello": "Hello", "goodbye": "Goodbye", "train": "Train" },
            "fr": { "hello": "Bonjour", "quai": "Quai" }
        }))
        .unwrap();

        let report = check_coverage(&dictionary, &locales(&["en", "fr"]), &Locale::new("en"));

        expect_that!(report.is_complete(), eq(false));
        expect_that!(report.missing_count(), eq(2));
        assert_eq!(report.missing.get("fr"), Some(&keys(&["goodbye", "train"])));
        assert_eq!(report.extra.get("fr"), Some(&keys(&["quai"])));
        assert_eq!(report.missing.get("en"), None);
    }

    #[googletest::test]
    fn reports_supported_locales_without_tables() {
        let dictionary = Dictionary::from_value(&json!({ "en": { "hello": "Hello" } })).unwrap();

        let report =
            check_coverage(&dictionary, &locales(&["en", "fr", "ar"]), &Locale::new("en"));

        expect_that!(report.is_complete(), eq(false));
        assert_eq!(report.absent_locales, locales(&["fr", "ar"]));
    }

    #[googletest::test]
    fn missing_reference_only_lists_absent_locales() {
        let dictionary = Dictionary::from_value(&json!({ "fr": { "hello": "Bonjour" } })).unwrap();

        let report = check_coverage(&dictionary, &locales(&["en", "fr"]), &Locale::new("en"));

        assert_eq!(report.absent_locales, locales(&["en"]));
        expect_that!(report.missing.is_empty(), eq(true));
    }
}
