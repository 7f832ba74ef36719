//! Engine settings, their defaults and validation.

use std::collections::HashSet;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::types::Locale;

/// Name of the settings file looked up at the workspace root.
pub const CONFIG_FILE_NAME: &str = ".i18n-render.json";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "supportedLocales[1]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    /// Locales a user may select. Order matters: the first one is the
    /// default when `default_locale` is unset.
    pub supported_locales: Vec<Locale>,

    pub default_locale: Option<Locale>,

    /// Key under which the selected locale is persisted.
    pub storage_key: String,

    /// Preference file, relative to the workspace root.
    pub preferences_file: String,

    pub bindings: BindingConfig,
    pub dictionary_files: DictionaryFilesConfig,
}

/// Marker attributes the UI layer uses to tag bindable nodes.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BindingConfig {
    /// Attribute holding the key for the node's text content.
    pub text_marker: String,
    /// Attribute holding the key for `target_attribute`.
    pub attribute_marker: String,
    pub target_attribute: String,
    /// Attribute carrying the locale code on language switcher controls.
    pub switcher_marker: String,
    pub active_class: String,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            text_marker: "data-i18n".to_string(),
            attribute_marker: "data-i18n-placeholder".to_string(),
            target_attribute: "placeholder".to_string(),
            switcher_marker: "data-lang".to_string(),
            active_class: "active".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DictionaryFilesConfig {
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

impl Default for DictionaryFilesConfig {
    fn default() -> Self {
        Self {
            include_patterns: vec!["**/locales/*.json".to_string()],
            exclude_patterns: vec!["**/node_modules/**".to_string()],
        }
    }
}

impl EngineSettings {
    /// The configured default, or the first supported locale.
    #[must_use]
    pub fn effective_default_locale(&self) -> Option<&Locale> {
        self.default_locale.as_ref().or_else(|| self.supported_locales.first())
    }

    /// # Errors
    /// - No supported locale, or an empty / duplicated one
    /// - Default locale outside the supported set
    /// - Empty storage key or binding marker
    /// - Invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.supported_locales.is_empty() {
            errors.push(ValidationError::new(
                "supportedLocales",
                "At least one locale is required. Example: [\"en\", \"fr\"]",
            ));
        }

        let mut seen = HashSet::new();
        for (index, locale) in self.supported_locales.iter().enumerate() {
            if locale.as_str().trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("supportedLocales[{index}]"),
                    "The locale code cannot be empty",
                ));
            } else if !seen.insert(locale.as_str()) {
                errors.push(ValidationError::new(
                    format!("supportedLocales[{index}]"),
                    format!("Duplicate locale '{locale}'"),
                ));
            }
        }

        if let Some(default) = &self.default_locale
            && !self.supported_locales.contains(default)
        {
            errors.push(ValidationError::new(
                "defaultLocale",
                format!("Default locale '{default}' is not listed in 'supportedLocales'"),
            ));
        }

        if self.storage_key.is_empty() {
            errors.push(ValidationError::new(
                "storageKey",
                "The storage key cannot be empty. Example: \"language\"",
            ));
        }

        if self.preferences_file.is_empty() {
            errors.push(ValidationError::new(
                "preferencesFile",
                "The path cannot be empty. Example: \".i18n-render/preferences.json\"",
            ));
        }

        self.validate_bindings(&mut errors);
        Self::validate_patterns(
            "dictionaryFiles.includePatterns",
            &self.dictionary_files.include_patterns,
            &mut errors,
        );
        Self::validate_patterns(
            "dictionaryFiles.excludePatterns",
            &self.dictionary_files.exclude_patterns,
            &mut errors,
        );

        if self.dictionary_files.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "dictionaryFiles.includePatterns",
                "At least one pattern is required. Example: [\"**/locales/*.json\"]",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    fn validate_bindings(&self, errors: &mut Vec<ValidationError>) {
        let bindings = &self.bindings;
        let required = [
            ("bindings.textMarker", &bindings.text_marker),
            ("bindings.attributeMarker", &bindings.attribute_marker),
            ("bindings.targetAttribute", &bindings.target_attribute),
            ("bindings.switcherMarker", &bindings.switcher_marker),
            ("bindings.activeClass", &bindings.active_class),
        ];
        for (field_path, value) in required {
            if value.is_empty() {
                errors.push(ValidationError::new(field_path, "The value cannot be empty"));
            }
        }

        if !bindings.text_marker.is_empty() && bindings.text_marker == bindings.attribute_marker {
            errors.push(ValidationError::new(
                "bindings.attributeMarker",
                "Must differ from 'textMarker', otherwise a node cannot carry both bindings",
            ));
        }
    }

    fn validate_patterns(field: &str, patterns: &[String], errors: &mut Vec<ValidationError>) {
        for (index, pattern) in patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("{field}[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            supported_locales: vec![Locale::new("en"), Locale::new("fr")],
            default_locale: None,
            storage_key: "language".to_string(),
            preferences_file: ".i18n-render/preferences.json".to_string(),
            bindings: BindingConfig::default(),
            dictionary_files: DictionaryFilesConfig::default(),
        }
    }
}
