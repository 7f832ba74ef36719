//! Dictionary Store: per-locale key/string tables.
/// Key coverage against the default locale
mod coverage;
/// Dictionary files on disk
mod loader;
/// Dictionary data and store
mod store;

pub use coverage::{
    CoverageReport,
    check_coverage,
};
pub use loader::{
    load_combined_file,
    load_locale_file,
    load_workspace_dictionary,
};
pub use store::{
    Dictionary,
    DictionaryError,
    DictionaryStore,
    LocaleEntries,
};
