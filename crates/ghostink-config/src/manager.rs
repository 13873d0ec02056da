//! Settings manager implementation

use std::path::PathBuf;

use config::{Config, Environment, File};
use tracing::warn;

use crate::{
    error::Result,
    types::Settings,
};

/// Layered settings loader: TOML file, then `GHOSTINK_*` env overrides
pub struct SettingsManager {
    settings_path: PathBuf,
    env_prefix: String,
}

impl SettingsManager {
    pub fn new() -> Self {
        Self {
            settings_path: Self::default_settings_path(),
            env_prefix: "GHOSTINK".to_string(),
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            settings_path: path,
            env_prefix: "GHOSTINK".to_string(),
        }
    }

    fn default_settings_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ghostink")
            .join("settings.toml")
    }

    /// Load settings, substituting defaults for anything absent or broken
    ///
    /// Loading never fails the caller: an unreadable or malformed file is
    /// logged and defaults are returned, matching the tolerate-anything
    /// contract of the settings collaborator.
    pub fn load(&self) -> Settings {
        match self.try_load() {
            Ok(settings) => settings,
            Err(err) => {
                warn!(error = %err, "failed to load settings, using defaults");
                Settings::default()
            }
        }
    }

    fn try_load(&self) -> Result<Settings> {
        let builder = Config::builder()
            .add_source(File::from(self.settings_path.clone()).required(false))
            .add_source(Environment::with_prefix(&self.env_prefix));

        let loaded = builder.build()?;
        let settings: Settings = loaded.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        let toml = toml::to_string(settings)?;
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.settings_path, toml)?;
        Ok(())
    }
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SettingsManager::with_path(dir.path().join("nope.toml"));
        assert_eq!(manager.load(), Settings::default());
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SettingsManager::with_path(dir.path().join("settings.toml"));
        let settings = Settings {
            debounce_time_ms: 450,
            wait_for_pause: true,
            use_ghost_text: false,
            is_enabled: true,
        };
        manager.save(&settings).unwrap();
        assert_eq!(manager.load(), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "wait_for_pause = true\n").unwrap();
        let manager = SettingsManager::with_path(path);
        let settings = manager.load();
        assert!(settings.wait_for_pause);
        assert_eq!(settings.debounce_time_ms, 300);
    }
}
