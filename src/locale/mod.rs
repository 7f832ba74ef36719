//! Active Locale State and its persistence.
/// Preference storage
mod persistence;
/// Active locale state
mod state;

pub use persistence::{
    FilePreferenceStore,
    MemoryPreferenceStore,
    PersistenceError,
    PreferenceStore,
};
pub use state::{
    LocaleError,
    LocaleState,
};
