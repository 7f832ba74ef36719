//! Settings file loader.

use std::path::Path;

use super::{
    CONFIG_FILE_NAME,
    ConfigError,
    EngineSettings,
};

/// Load settings from the workspace root.
///
/// Looks for the `.i18n-render.json` file.
///
/// # Returns
/// - `Ok(Some(settings))`: the file exists and was parsed
/// - `Ok(None)`: no settings file
/// - `Err(ConfigError)`: read or parse failure
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<EngineSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: EngineSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
