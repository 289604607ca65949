use anyhow::{Context, Result};
use log::LevelFilter;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::config::ConfigManager;

/// Rotate once the log file grows past this many bytes
const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;

/// Initialize the logging system
///
/// Console output goes to stderr and defaults to `warn` so it does not
/// interleave with the interactive prompts. `RUST_LOG` overrides the level:
///
/// ```bash
/// # Show every action the session dispatches
/// RUST_LOG=debug redteam-logbook
/// ```
///
/// Session activity is also appended to `redteam-logbook.log` in the config
/// directory (see [`ConfigManager::log_file_path`]).
pub fn init_logger() -> Result<()> {
    ConfigManager::ensure_config_dir()?;

    let default_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn);

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{:5}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(default_level)
        .target(env_logger::Target::Stderr)
        .try_init()
        .ok(); // Already initialized in tests

    log_to_file(&format!("Logger initialized with level: {default_level:?}"))?;

    Ok(())
}

/// Append a line to the session log file
pub fn log_to_file(message: &str) -> Result<()> {
    append_line(&ConfigManager::log_file_path()?, message)
}

fn append_line(log_path: &Path, message: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    writeln!(
        file,
        "[{}] {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        message
    )?;

    Ok(())
}

/// Rotate the log file to `.log.old` if it exceeds 10MB
pub fn rotate_log_if_needed() -> Result<()> {
    rotate_file(&ConfigManager::log_file_path()?, MAX_LOG_SIZE)
}

fn rotate_file(log_path: &Path, max_size: u64) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let metadata = std::fs::metadata(log_path)?;
    if metadata.len() > max_size {
        let old_log_path = log_path.with_extension("log.old");

        if old_log_path.exists() {
            std::fs::remove_file(&old_log_path)?;
        }
        std::fs::rename(log_path, &old_log_path)?;

        log::info!("Log file rotated to {}", old_log_path.display());
    }

    Ok(())
}
