//! Settings persistence
//!
//! Loads and saves the [`EditorConfig`] as TOML or JSON, chosen by the file
//! extension. A missing file yields the defaults.

use crate::config::EditorConfig;
use crate::error::{SettingsError, SettingsResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const APP_DIR: &str = "pcbkit";
const CONFIG_FILE: &str = "editor.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
}

impl Format {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Settings persistence layer
#[derive(Debug, Clone, Default)]
pub struct SettingsPersistence {
    config: EditorConfig,
    path: Option<PathBuf>,
}

impl SettingsPersistence {
    /// Create new persistence layer with default config and no file
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform configuration file, e.g. `~/.config/pcbkit/editor.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Load from the platform configuration file.
    pub fn load_default() -> SettingsResult<Self> {
        Self::load_from_file(&Self::default_path()?)
    }

    /// Load settings from file, falling back to defaults if it does not exist.
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::from_path(path)?;
        if !path.exists() {
            info!("No settings at {}, using defaults", path.display());
            return Ok(Self {
                config: EditorConfig::default(),
                path: Some(path.to_path_buf()),
            });
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;
        let config: EditorConfig = match format {
            Format::Toml => toml::from_str(&content)?,
            Format::Json => serde_json::from_str(&content)?,
        };
        config.validate()?;
        debug!("Loaded settings from {}", path.display());

        Ok(Self {
            config,
            path: Some(path.to_path_buf()),
        })
    }

    /// Save settings to `path`, creating parent directories as needed.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.config.validate()?;
        let format = Format::from_path(path)?;
        let content = match format {
            Format::Toml => toml::to_string_pretty(&self.config)?,
            Format::Json => serde_json::to_string_pretty(&self.config)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e)))?;
        }
        fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;
        debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Save back to the file the settings were loaded from.
    pub fn save(&self) -> SettingsResult<()> {
        match &self.path {
            Some(path) => self.save_to_file(path),
            None => Err(SettingsError::SaveError("no settings file associated".into())),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EditorConfig {
        &mut self.config
    }

    pub fn into_config(self) -> EditorConfig {
        self.config
    }

    pub fn validate(&self) -> SettingsResult<()> {
        self.config.validate()
    }
}
