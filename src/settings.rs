use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::timezone::DEFAULT_TIMEZONE;

/// User settings for logging sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Timezone active when a session starts
    #[serde(default = "default_timezone")]
    pub default_timezone: String,

    /// Directory offered for exports (current directory when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,

    /// File name offered for exports
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,

    /// Ask before replacing an existing export file
    #[serde(default = "default_confirm_overwrite")]
    pub confirm_overwrite: bool,
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_export_file_name() -> String {
    "operations.csv".to_string()
}

fn default_confirm_overwrite() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            default_timezone: default_timezone(),
            export_dir: None,
            export_file_name: default_export_file_name(),
            confirm_overwrite: default_confirm_overwrite(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the settings file, or defaults if it is missing
    pub fn load() -> Result<Self> {
        Self::load_from(&crate::config::ConfigManager::settings_path()?)
    }

    /// Save configuration to the settings file
    pub fn save(&self) -> Result<()> {
        self.save_to(&crate::config::ConfigManager::settings_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: AppConfig = toml::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    /// Export destination offered to the user
    pub fn default_export_path(&self) -> PathBuf {
        match &self.export_dir {
            Some(dir) => dir.join(&self.export_file_name),
            None => PathBuf::from(&self.export_file_name),
        }
    }
}
