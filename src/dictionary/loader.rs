//! Dictionary files on disk.

use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;

use super::store::{
    Dictionary,
    DictionaryError,
    LocaleEntries,
    entries_from_value,
    parse_json,
};
use crate::config::DictionaryFileMatcher;
use crate::types::Locale;

/// Detect the locale of a per-locale file from its path.
///
/// Splits the path by '/' and '.', then searches backwards for a part that
/// matches one of the `supported` locales.
///
/// # Examples
/// - `locales/en.json` → `en`
/// - `locales/fr-CA.json` → `fr-CA`
/// - `i18n/fr/common.json` → `fr`
fn detect_locale_from_path(file_path: &Path, supported: &[Locale]) -> Option<Locale> {
    let path_str = file_path.to_string_lossy();

    path_str
        .split(['/', '\\', '.'])
        .rev()
        .find_map(|part| supported.iter().find(|locale| locale.matches_loosely(part)))
        .cloned()
}

/// Read one flat `{key: string}` file.
pub fn load_locale_file(file_path: &Path) -> Result<LocaleEntries, DictionaryError> {
    let content = std::fs::read_to_string(file_path).map_err(|source| DictionaryError::Io {
        path: file_path.display().to_string(),
        source,
    })?;

    let value = parse_json(&content)?;
    entries_from_value(&file_path.display().to_string(), &value)
}

/// Read one combined `{locale: {key: string}}` file.
pub fn load_combined_file(file_path: &Path) -> Result<Dictionary, DictionaryError> {
    tracing::debug!("Loading combined dictionary from: {:?}", file_path);

    let content = std::fs::read_to_string(file_path).map_err(|source| DictionaryError::Io {
        path: file_path.display().to_string(),
        source,
    })?;

    Dictionary::from_json_str(&content)
}

/// Discover and merge the per-locale files of a workspace.
///
/// Files are processed in path order. Files of the same locale are merged,
/// later files overriding earlier keys. Files whose locale cannot be
/// detected are skipped.
///
/// # Errors
/// The first unreadable or malformed dictionary file aborts the load.
pub fn load_workspace_dictionary(
    matcher: &DictionaryFileMatcher,
    supported: &[Locale],
) -> Result<Dictionary, DictionaryError> {
    let files = find_dictionary_files(matcher);
    tracing::debug!(count = files.len(), "Found dictionary files");

    let mut merged: HashMap<Locale, LocaleEntries> = HashMap::new();
    for file in files {
        let relative = file.strip_prefix(matcher.workspace_root()).unwrap_or(&file);
        let Some(locale) = detect_locale_from_path(relative, supported) else {
            tracing::warn!("Skipping dictionary file with unknown locale: {:?}", file);
            continue;
        };

        let entries = load_locale_file(&file)?;
        tracing::debug!(locale = %locale, keys = entries.len(), "Loaded {:?}", file);

        let table = merged.entry(locale.clone()).or_default();
        for (key, text) in entries {
            if table.insert(key.clone(), text).is_some() {
                tracing::warn!(
                    locale = %locale,
                    key = %key,
                    "Duplicate key overridden by {:?}",
                    file
                );
            }
        }
    }

    Ok(merged.into_iter().collect())
}

fn find_dictionary_files(matcher: &DictionaryFileMatcher) -> Vec<PathBuf> {
    let mut found_files = Vec::new();

    for result in WalkBuilder::new(matcher.workspace_root())
        .hidden(false)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        if matcher.is_dictionary_file(entry.path()) {
            found_files.push(entry.path().to_path_buf());
        }
    }

    found_files.sort();
    found_files
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::EngineSettings;

    fn supported() -> Vec<Locale> {
        vec![Locale::new("en"), Locale::new("fr"), Locale::new("fr-CA")]
    }

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn matcher_for(root: &Path, include: &str) -> DictionaryFileMatcher {
        let mut settings = EngineSettings::default();
        settings.dictionary_files.include_patterns = vec![include.to_string()];
        DictionaryFileMatcher::new(root.to_path_buf(), &settings).unwrap()
    }

    #[rstest]
    #[case::file_stem("locales/en.json", Some("en"))]
    #[case::region("locales/fr-CA.json", Some("fr-CA"))]
    #[case::region_underscore("locales/fr_ca.json", Some("fr-CA"))]
    #[case::directory("i18n/fr/common.json", Some("fr"))]
    #[case::unsupported("locales/de.json", None)]
    #[case::no_locale("locales/common.json", None)]
    fn test_detect_locale_from_path(#[case] path: &str, #[case] expected: Option<&str>) {
        let detected = detect_locale_from_path(Path::new(path), &supported());

        assert_eq!(detected, expected.map(Locale::new));
    }

    #[googletest::test]
    fn load_workspace_dictionary_merges_files_by_locale() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "i18n/en/common.json", r#"{"hello": "Hello"}"#);
        write(temp_dir.path(), "i18n/en/nav.json", r#"{"dashboard": "Dashboard"}"#);
        write(temp_dir.path(), "i18n/fr/common.json", r#"{"hello": "Bonjour", /* reviewed */}"#);
        let matcher = matcher_for(temp_dir.path(), "i18n/**/*.json");

        let dictionary = load_workspace_dictionary(&matcher, &supported()).unwrap();

        expect_that!(dictionary.lookup("en", "hello"), some(eq("Hello")));
        expect_that!(dictionary.lookup("en", "dashboard"), some(eq("Dashboard")));
        expect_that!(dictionary.lookup("fr", "hello"), some(eq("Bonjour")));
        expect_that!(dictionary.contains_locale("fr-CA"), eq(false));
    }

    #[googletest::test]
    fn load_workspace_dictionary_later_files_override() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "a/locales/en.json", r#"{"hello": "Hello"}"#);
        write(temp_dir.path(), "b/locales/en.json", r#"{"hello": "Hi"}"#);
        let matcher = matcher_for(temp_dir.path(), "**/locales/*.json");

        let dictionary = load_workspace_dictionary(&matcher, &supported()).unwrap();

        expect_that!(dictionary.lookup("en", "hello"), some(eq("Hi")));
    }

    #[googletest::test]
    fn load_workspace_dictionary_skips_unknown_locales() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "locales/en.json", r#"{"hello": "Hello"}"#);
        write(temp_dir.path(), "locales/de.json", r#"{"hello": "Hallo"}"#);
        let matcher = matcher_for(temp_dir.path(), "**/locales/*.json");

        let dictionary = load_workspace_dictionary(&matcher, &supported()).unwrap();

        let locales: Vec<&str> = dictionary.locales().into_iter().map(Locale::as_str).collect();
        expect_that!(locales, eq(&vec!["en"]));
    }

    #[rstest]
    fn load_workspace_dictionary_rejects_nested_tables() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "locales/en.json", r#"{"nav": {"home": "Home"}}"#);
        let matcher = matcher_for(temp_dir.path(), "**/locales/*.json");

        let result = load_workspace_dictionary(&matcher, &supported());

        assert!(matches!(result, Err(DictionaryError::Malformed { .. })));
    }

    #[rstest]
    fn load_combined_file_reads_all_locales() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            "translations.json",
            r#"{"en": {"train": "Train"}, "fr": {"train": "Train", "delay": "Retard"}}"#,
        );

        let dictionary = load_combined_file(&temp_dir.path().join("translations.json")).unwrap();

        assert_eq!(dictionary.lookup("fr", "delay"), Some("Retard"));
        assert_eq!(dictionary.lookup("en", "delay"), None);
    }

    #[rstest]
    fn load_combined_file_missing_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_combined_file(&temp_dir.path().join("missing.json"));

        assert!(matches!(result, Err(DictionaryError::Io { .. })));
    }
}
