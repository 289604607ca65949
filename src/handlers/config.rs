//! Configuration command handlers
//!
//! Handles showing, updating from flags, and interactively editing the
//! session settings.

use anyhow::{Context, Result};
use colored::Colorize;
use inquire::{Confirm, MultiSelect, Select, Text};
use std::path::PathBuf;

use crate::settings::AppConfig;
use crate::timezone::{IanaDatabase, TimezoneRegistry};

/// Handle `config --show`
pub fn handle_config_show() -> Result<()> {
    let config = AppConfig::load().context("Failed to load current configuration")?;

    println!("{}", "Current Settings:".bold());
    display_config_summary(&config);
    Ok(())
}

/// Handle `config` with one or more setting flags
pub fn handle_config_update(
    default_timezone: Option<String>,
    export_dir: Option<PathBuf>,
    export_file_name: Option<String>,
    confirm_overwrite: Option<bool>,
) -> Result<()> {
    let mut config = AppConfig::load().context("Failed to load current configuration")?;
    apply_updates(
        &mut config,
        default_timezone,
        export_dir,
        export_file_name,
        confirm_overwrite,
    )?;

    config.save().context("Failed to save configuration")?;
    println!("{} Configuration saved successfully!", "✓".green().bold());
    display_config_summary(&config);
    Ok(())
}

/// Apply flag values onto `config`, validating the timezone and file name
pub fn apply_updates(
    config: &mut AppConfig,
    default_timezone: Option<String>,
    export_dir: Option<PathBuf>,
    export_file_name: Option<String>,
    confirm_overwrite: Option<bool>,
) -> Result<()> {
    if let Some(name) = default_timezone {
        config.default_timezone = canonical_timezone(&name)?;
    }

    if let Some(dir) = export_dir {
        // An empty path clears the setting
        config.export_dir = if dir.as_os_str().is_empty() { None } else { Some(dir) };
    }

    if let Some(name) = export_file_name {
        let name = name.trim();
        if name.is_empty() {
            anyhow::bail!("Export file name cannot be empty");
        }
        config.export_file_name = name.to_string();
    }

    if let Some(confirm) = confirm_overwrite {
        config.confirm_overwrite = confirm;
    }

    Ok(())
}

fn canonical_timezone(name: &str) -> Result<String> {
    IanaDatabase
        .resolve(name)
        .map(|tz| tz.name().to_string())
        .ok_or_else(|| anyhow::anyhow!("Unknown timezone '{}'", name.trim()))
}

/// Handle interactive configuration menu
///
/// Shows all configuration options and allows user to select which ones to modify
pub fn handle_config_interactive() -> Result<()> {
    println!("{}", "Interactive Configuration".cyan().bold());
    println!("{}", "=".repeat(60).cyan());
    println!();

    let current_config = AppConfig::load().context("Failed to load current configuration")?;

    println!("{}", "Current Settings:".bold());
    display_config_summary(&current_config);
    println!();

    let options = vec![
        "Default timezone",
        "Export directory",
        "Export file name",
        "Confirm overwrite",
    ];

    let selections = MultiSelect::new(
        "Select settings to modify (Space to select, Enter to confirm):",
        options,
    )
    .with_help_message("Use arrow keys to navigate, Space to select/deselect, Enter when done")
    .prompt()
    .context("Failed to get user selections")?;

    if selections.is_empty() {
        println!("{}", "No settings selected. Configuration unchanged.".yellow());
        return Ok(());
    }

    let mut modified_config = current_config.clone();

    for selection in selections {
        match selection {
            "Default timezone" => {
                let identifiers = IanaDatabase.identifiers();
                let current = identifiers
                    .iter()
                    .position(|id| *id == modified_config.default_timezone)
                    .unwrap_or(0);

                let name = Select::new("Default timezone:", identifiers)
                    .with_starting_cursor(current)
                    .with_page_size(12)
                    .with_help_message("Type to filter, Enter to select")
                    .prompt()?;

                modified_config.default_timezone = name.to_string();
                println!("  {} Set default timezone to {}", "✓".green(), name);
            }

            "Export directory" => {
                let current = modified_config
                    .export_dir
                    .as_ref()
                    .map(|d| d.display().to_string())
                    .unwrap_or_default();

                let input = Text::new("Export directory:")
                    .with_default(&current)
                    .with_help_message("Leave empty to export into the current directory")
                    .prompt()?;

                if input.trim().is_empty() {
                    modified_config.export_dir = None;
                    println!("  {} Cleared export directory", "✓".green());
                } else {
                    modified_config.export_dir = Some(PathBuf::from(input.trim()));
                    println!("  {} Set export directory to {}", "✓".green(), input.trim());
                }
            }

            "Export file name" => {
                let input = Text::new("Export file name:")
                    .with_default(&modified_config.export_file_name)
                    .prompt()?;

                apply_updates(&mut modified_config, None, None, Some(input), None)?;
                println!(
                    "  {} Set export file name to {}",
                    "✓".green(),
                    modified_config.export_file_name
                );
            }

            "Confirm overwrite" => {
                let confirm = Confirm::new("Ask before overwriting an existing export?")
                    .with_default(modified_config.confirm_overwrite)
                    .prompt()?;

                modified_config.confirm_overwrite = confirm;
                println!("  {} Set confirm_overwrite to {}", "✓".green(), confirm);
            }

            _ => {}
        }
    }

    println!();
    println!("{}", "New Configuration:".cyan().bold());
    display_config_summary(&modified_config);
    println!();

    let confirm = Confirm::new("Save this configuration?")
        .with_default(true)
        .prompt()?;

    if confirm {
        modified_config.save().context("Failed to save configuration")?;
        println!("\n{} Configuration saved successfully!", "✓".green().bold());
    } else {
        println!("\n{}", "Configuration not saved.".yellow());
    }

    Ok(())
}

/// Display a compact configuration summary
fn display_config_summary(config: &AppConfig) {
    println!("  {} {}", "Default timezone:".cyan(), config.default_timezone);

    println!(
        "  {} {}",
        "Export directory:".cyan(),
        config
            .export_dir
            .as_ref()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| "Current directory".dimmed().to_string())
    );

    println!("  {} {}", "Export file name:".cyan(), config.export_file_name);

    println!(
        "  {} {}",
        "Confirm overwrite:".cyan(),
        if config.confirm_overwrite {
            "Yes".green().to_string()
        } else {
            "No".yellow().to_string()
        }
    );
}
