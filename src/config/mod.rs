//! Engine configuration: settings types, workspace loader and file matcher.
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Dictionary file pattern matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use manager::ConfigManager;
pub use matcher::{
    DictionaryFileMatcher,
    MatcherError,
};
pub use types::{
    BindingConfig,
    CONFIG_FILE_NAME,
    ConfigError,
    DictionaryFilesConfig,
    EngineSettings,
    ValidationError,
};
