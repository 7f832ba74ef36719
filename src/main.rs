//! Command line front end: validate a workspace's dictionaries and locale preference.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use i18n_render_engine::config::{
    ConfigError,
    ConfigManager,
    DictionaryFileMatcher,
    MatcherError,
};
use i18n_render_engine::dictionary::{
    DictionaryError,
    check_coverage,
    load_combined_file,
    load_workspace_dictionary,
};
use i18n_render_engine::locale::{
    FilePreferenceStore,
    LocaleError,
    LocaleState,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "i18n-render-engine")]
#[command(version)]
#[command(about = "Check translation dictionaries and manage the persisted locale")]
struct Cli {
    /// Workspace holding `.i18n-render.json` and the dictionary files
    #[arg(value_name = "WORKSPACE", default_value = ".")]
    workspace: PathBuf,

    /// Combined `{locale: {key: text}}` file instead of per-locale files
    #[arg(short, long, value_name = "FILE")]
    dictionary: Option<PathBuf>,

    /// Select and persist this locale
    #[arg(short, long, value_name = "CODE")]
    locale: Option<String>,

    /// Fail when a supported locale is missing keys of the default locale
    #[arg(long)]
    strict: bool,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Matcher(#[from] MatcherError),

    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    #[error(transparent)]
    Locale(#[from] LocaleError),

    #[error(
        "Incomplete dictionary: {missing} missing translation(s), {absent} locale(s) without entries"
    )]
    Incomplete { missing: usize, absent: usize },
}

fn main() -> ExitCode {
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .init();

    match run(&Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let mut manager = ConfigManager::new();
    manager.load_settings(Some(cli.workspace.clone()))?;
    let settings = manager.get_settings();

    let dictionary = if let Some(path) = &cli.dictionary {
        load_combined_file(path)?
    } else {
        let matcher = DictionaryFileMatcher::new(cli.workspace.clone(), settings)?;
        load_workspace_dictionary(&matcher, &settings.supported_locales)?
    };

    let mut state =
        LocaleState::from_settings(settings, FilePreferenceStore::new(manager.preferences_path()))?;

    let coverage = check_coverage(&dictionary, state.supported(), state.default_locale());
    coverage.log();
    tracing::info!(
        locales = dictionary.locales().len(),
        missing = coverage.missing_count(),
        "Dictionary loaded"
    );

    if cli.strict && !coverage.is_complete() {
        return Err(CliError::Incomplete {
            missing: coverage.missing_count(),
            absent: coverage.absent_locales.len(),
        });
    }

    if let Some(code) = &cli.locale {
        state.set_current(code)?;
    }
    tracing::info!(locale = %state.current(), "Active locale");

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;
    use std::path::Path;

    use googletest::prelude::*;
    use tempfile::TempDir;

    use super::*;

    fn workspace(fr: &str) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let locales = temp_dir.path().join("locales");
        fs::create_dir_all(&locales).unwrap();
        fs::write(locales.join("en.json"), r#"{"hello": "Hello", "goodbye": "Goodbye"}"#)
            .unwrap();
        fs::write(locales.join("fr.json"), fr).unwrap();
        temp_dir
    }

    fn cli(root: &Path, locale: Option<&str>, strict: bool) -> Cli {
        Cli {
            workspace: root.to_path_buf(),
            dictionary: None,
            locale: locale.map(str::to_string),
            strict,
        }
    }

    fn preferences(root: &Path) -> PathBuf {
        root.join(".i18n-render/preferences.json")
    }

    #[googletest::test]
    fn selected_locale_is_persisted() {
        let temp_dir = workspace(r#"{"hello": "Bonjour", "goodbye": "Au revoir"}"#);

        run(&cli(temp_dir.path(), Some("fr"), true)).unwrap();

        let saved = fs::read_to_string(preferences(temp_dir.path())).unwrap();
        expect_that!(saved, contains_substring("\"fr\""));
    }

    #[googletest::test]
    fn failed_strict_run_leaves_preference_untouched() {
        let temp_dir = workspace(r#"{"hello": "Bonjour"}"#);

        let result = run(&cli(temp_dir.path(), Some("fr"), true));

        expect_that!(
            matches!(result, Err(CliError::Incomplete { missing: 1, absent: 0 })),
            eq(true)
        );
        expect_that!(preferences(temp_dir.path()).exists(), eq(false));
    }

    #[googletest::test]
    fn incomplete_error_counts_missing_keys_and_absent_locales_apart() {
        let error = CliError::Incomplete { missing: 2, absent: 1 };

        expect_that!(
            error.to_string(),
            eq("Incomplete dictionary: 2 missing translation(s), 1 locale(s) without entries")
        );
    }

    #[googletest::test]
    fn unsupported_locale_is_rejected() {
        let temp_dir = workspace(r#"{"hello": "Bonjour", "goodbye": "Au revoir"}"#);

        let result = run(&cli(temp_dir.path(), Some("de"), false));

        expect_that!(matches!(result, Err(CliError::Locale(_))), eq(true));
    }
}
