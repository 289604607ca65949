//! Settings persistence through the platform config directory.

use redteam_logbook::app::AppState;
use redteam_logbook::config::ConfigManager;
use redteam_logbook::settings::AppConfig;
use serial_test::serial;
use std::path::PathBuf;
use tempfile::TempDir;

/// Point the config directory at a temp dir for the duration of a test
struct ConfigHome {
    _temp: TempDir,
    previous: Option<String>,
}

impl ConfigHome {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let previous = std::env::var("XDG_CONFIG_HOME").ok();
        std::env::set_var("XDG_CONFIG_HOME", temp.path());
        Self {
            _temp: temp,
            previous,
        }
    }
}

impl Drop for ConfigHome {
    fn drop(&mut self) {
        match &self.previous {
            Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }
}

#[test]
#[serial]
#[cfg(target_os = "linux")]
fn test_load_without_file_gives_defaults() {
    let _home = ConfigHome::new();

    let config = AppConfig::load().unwrap();

    assert_eq!(config, AppConfig::default());
    assert!(!ConfigManager::settings_path().unwrap().exists());
}

#[test]
#[serial]
#[cfg(target_os = "linux")]
fn test_save_then_load() {
    let _home = ConfigHome::new();

    let config = AppConfig {
        default_timezone: "Europe/Berlin".to_string(),
        export_dir: Some(PathBuf::from("/srv/engagements")),
        export_file_name: "red-team.csv".to_string(),
        confirm_overwrite: false,
    };
    config.save().unwrap();

    assert!(ConfigManager::settings_path().unwrap().exists());
    assert_eq!(AppConfig::load().unwrap(), config);
}

#[test]
#[serial]
#[cfg(target_os = "linux")]
fn test_session_starts_in_configured_timezone() {
    let _home = ConfigHome::new();

    AppConfig {
        default_timezone: "Australia/Sydney".to_string(),
        ..AppConfig::default()
    }
    .save()
    .unwrap();

    let state = AppState::from_config(&AppConfig::load().unwrap()).unwrap();
    assert_eq!(state.timezone().name(), "Australia/Sydney");
}

#[test]
fn test_config_serializes_to_toml() {
    let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
    assert!(text.contains("default_timezone = \"UTC\""));
    assert!(text.contains("export_file_name = \"operations.csv\""));
    assert!(!text.contains("export_dir"));
}
