//! i18n-render-engine
//!
//! Key-based localization: a per-locale dictionary, a persisted active
//! locale and a render pass that syncs bound UI nodes with it.

pub mod config;
pub mod dictionary;
pub mod engine;
pub mod locale;
pub mod render;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use engine::{
    EngineError,
    LocalizationEngine,
};
pub use types::{
    Locale,
    TranslationKey,
};
