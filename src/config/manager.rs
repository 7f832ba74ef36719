//! Settings lifecycle for one workspace.

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    EngineSettings,
    loader,
};

/// Holds the validated settings of the current workspace.
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    current_settings: EngineSettings,
    workspace_root: Option<PathBuf>,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: EngineSettings::default(), workspace_root: None }
    }

    /// Load and validate settings for `workspace_root`.
    ///
    /// Falls back to defaults when there is no workspace or no settings file.
    /// On error the previous settings are kept.
    ///
    /// # Errors
    /// - File read failure
    /// - JSON parse failure
    /// - Validation failure
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for workspace: {:?}", workspace_root);

        let settings = if let Some(root) = &workspace_root {
            loader::load_from_workspace(root)?.map_or_else(EngineSettings::default, |ws| {
                tracing::debug!("Loaded workspace settings: {:?}", ws);
                ws
            })
        } else {
            EngineSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.workspace_root = workspace_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &EngineSettings {
        &self.current_settings
    }

    #[must_use]
    pub const fn workspace_root(&self) -> Option<&PathBuf> {
        self.workspace_root.as_ref()
    }

    /// Absolute location of the preference file.
    ///
    /// Relative to the workspace root, or to the working directory without one.
    #[must_use]
    pub fn preferences_path(&self) -> PathBuf {
        let file = Path::new(&self.current_settings.preferences_file);
        self.workspace_root.as_ref().map_or_else(|| file.to_path_buf(), |root| root.join(file))
    }
}
