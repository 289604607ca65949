//! Interactive logging session
//!
//! Menu loop standing in for the logging form: each menu entry collects its
//! inputs with `inquire` prompts, turns them into an [`Action`] and hands it
//! to the dispatcher. Errors are printed and the loop carries on.

use anyhow::{Context, Result};
use colored::Colorize;
use inquire::{Confirm, InquireError, MultiSelect, Select, Text};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::app::{Action, AppState, Outcome};
use crate::error::LogbookError;
use crate::export::resolve_destination;
use crate::logger;
use crate::model::KillChainStep;
use crate::settings::AppConfig;

/// Entry in the session menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    AddAsset,
    DeleteAsset,
    LogOperation,
    ViewLog,
    SetTimezone,
    Export,
    Quit,
}

impl MenuItem {
    const ALL: [MenuItem; 7] = [
        MenuItem::AddAsset,
        MenuItem::DeleteAsset,
        MenuItem::LogOperation,
        MenuItem::ViewLog,
        MenuItem::SetTimezone,
        MenuItem::Export,
        MenuItem::Quit,
    ];
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuItem::AddAsset => write!(f, "Add Asset"),
            MenuItem::DeleteAsset => write!(f, "Delete Asset"),
            MenuItem::LogOperation => write!(f, "Log Operation"),
            MenuItem::ViewLog => write!(f, "View Logged Data"),
            MenuItem::SetTimezone => write!(f, "Select Timezone"),
            MenuItem::Export => write!(f, "Export to CSV"),
            MenuItem::Quit => write!(f, "Quit"),
        }
    }
}

/// Asset shown in the delete picker, remembering its list position
struct AssetChoice {
    position: usize,
    name: String,
}

impl fmt::Display for AssetChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.position + 1, self.name)
    }
}

/// Check if we're running in an interactive terminal
pub fn is_interactive() -> bool {
    atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stdout)
}

/// Run the menu loop until the user quits or presses Ctrl-C
pub fn run_session(state: &mut AppState, config: &AppConfig) -> Result<()> {
    if !is_interactive() {
        anyhow::bail!("The logging session needs an interactive terminal");
    }

    print_banner(state);
    logger::log_to_file(&format!(
        "Session started in timezone {}",
        state.timezone().name()
    ))?;

    loop {
        let item = match Select::new("What would you like to do?", MenuItem::ALL.to_vec())
            .with_help_message("Use arrow keys to navigate, Enter to select")
            .prompt()
        {
            Ok(item) => item,
            Err(InquireError::OperationCanceled) => continue,
            Err(InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read menu selection"),
        };

        let prompted = match item {
            MenuItem::Quit => break,
            MenuItem::ViewLog => {
                print_log(state);
                continue;
            }
            MenuItem::AddAsset => prompt_add_asset(),
            MenuItem::DeleteAsset => prompt_delete_asset(state),
            MenuItem::LogOperation => prompt_log_operation(state),
            MenuItem::SetTimezone => prompt_set_timezone(state),
            MenuItem::Export => prompt_export(state, config),
        };

        let action = match prompted {
            Ok(Some(action)) => action,
            Ok(None) => continue,
            Err(e) if is_interrupt(&e) => break,
            Err(e) => return Err(e),
        };

        let logged_operation = matches!(action, Action::LogOperation { .. });
        match state.dispatch(action) {
            Ok(outcome) => {
                print_success(&outcome);
                if let Err(e) = logger::log_to_file(&outcome.message()) {
                    log::warn!("Could not write session log: {e:#}");
                }
                if logged_operation {
                    print_log(state);
                }
            }
            Err(err) => print_error(&err),
        }
    }

    println!("{}", "Session ended. Unexported operations are discarded.".dimmed());
    Ok(())
}

/// Treat Escape as "nothing entered"
fn skippable<T>(result: Result<Option<T>, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(value),
        Err(InquireError::OperationCanceled) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn is_interrupt(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<InquireError>(),
        Some(InquireError::OperationInterrupted)
    )
}

fn prompt_add_asset() -> Result<Option<Action>> {
    let name = skippable(
        Text::new("Asset name:")
            .with_help_message("Hostname, IP or any label for the target")
            .prompt_skippable(),
    )?;

    Ok(name.map(|name| Action::AddAsset { name }))
}

fn prompt_delete_asset(state: &AppState) -> Result<Option<Action>> {
    let choices: Vec<AssetChoice> = state
        .assets()
        .list()
        .into_iter()
        .enumerate()
        .map(|(position, name)| AssetChoice { position, name })
        .collect();

    // Nothing to pick from: dispatch anyway so the user sees why
    if choices.is_empty() {
        return Ok(Some(Action::RemoveAsset { position: None }));
    }

    let selected = skippable(
        Select::new("Select the asset to delete:", choices)
            .with_help_message("Enter to delete, Esc to cancel")
            .prompt_skippable(),
    )?;

    Ok(Some(Action::RemoveAsset {
        position: selected.map(|choice| choice.position),
    }))
}

fn prompt_log_operation(state: &AppState) -> Result<Option<Action>> {
    let Some(command) = skippable(Text::new("Command:").prompt_skippable())? else {
        return Ok(None);
    };

    let selectable = state.assets().selectable_targets().to_vec();
    let targets = if selectable.is_empty() {
        println!("{}", "No assets to target yet. Add one first.".yellow());
        Vec::new()
    } else {
        skippable(
            MultiSelect::new("Targeted assets:", selectable)
                .with_help_message("Space to select/deselect, Enter when done")
                .prompt_skippable(),
        )?
        .unwrap_or_default()
    };

    let kill_chain_step = skippable(
        Select::new("Kill chain step (optional):", KillChainStep::ALL.to_vec())
            .with_help_message("Enter to select, Esc to leave unset")
            .prompt_skippable(),
    )?;

    Ok(Some(Action::LogOperation {
        command,
        targets,
        kill_chain_step,
    }))
}

fn prompt_set_timezone(state: &AppState) -> Result<Option<Action>> {
    let identifiers = state.timezones().identifiers();
    let current = identifiers
        .iter()
        .position(|id| *id == state.timezone().name())
        .unwrap_or(0);

    let selected = skippable(
        Select::new("Select timezone:", identifiers)
            .with_starting_cursor(current)
            .with_page_size(12)
            .with_help_message("Type to filter, Enter to select, Esc to cancel")
            .prompt_skippable(),
    )?;

    Ok(selected.map(|name| Action::SetTimezone {
        name: name.to_string(),
    }))
}

fn prompt_export(state: &AppState, config: &AppConfig) -> Result<Option<Action>> {
    let default_path = config.default_export_path();

    // An empty log is rejected by the dispatcher before any path is needed
    if state.log().is_empty() {
        return Ok(Some(Action::Export {
            destination: default_path,
        }));
    }

    let default_text = default_path.display().to_string();
    let Some(input) = skippable(
        Text::new("Export to:")
            .with_default(&default_text)
            .with_help_message("A .csv extension is added when missing")
            .prompt_skippable(),
    )?
    else {
        return Ok(None);
    };

    let Some(destination) = export_destination(&input, config) else {
        println!("{}", "Export cancelled.".yellow());
        return Ok(None);
    };
    let resolved = resolve_destination(&destination);

    if config.confirm_overwrite && resolved.exists() {
        let overwrite = skippable(
            Confirm::new(&format!("{} already exists. Overwrite?", resolved.display()))
                .with_default(false)
                .prompt_skippable(),
        )?
        .unwrap_or(false);

        if !overwrite {
            println!("{}", "Export cancelled.".yellow());
            return Ok(None);
        }
    }

    Ok(Some(Action::Export { destination }))
}

/// Turn typed export input into a destination
///
/// Blank input cancels; an existing directory gets the configured file name.
fn export_destination(input: &str, config: &AppConfig) -> Option<PathBuf> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let path = Path::new(input);
    if path.is_dir() {
        Some(path.join(&config.export_file_name))
    } else {
        Some(path.to_path_buf())
    }
}

fn print_banner(state: &AppState) {
    println!("{}", "Red Team Logbook".cyan().bold());
    println!("{}", "=".repeat(60).cyan());
    println!(
        "  {} {}",
        "Current Timezone:".cyan(),
        state.timezone().name().bold()
    );
    println!();
}

fn print_log(state: &AppState) {
    println!();
    println!("{}", "Logged Data".cyan().bold());
    println!("{}", "-".repeat(60).cyan());

    let lines = state.log().render();
    if lines.is_empty() {
        println!("  {}", "No operations logged yet.".dimmed());
    }
    for line in lines {
        println!("  {line}");
    }
    println!();
}

fn print_success(outcome: &Outcome) {
    match outcome {
        // The log view is re-rendered right after, no need to repeat the line
        Outcome::OperationLogged { .. } => {
            println!("{} {}", "✓".green().bold(), "Operation logged".green())
        }
        _ => println!("{} {}", "✓".green().bold(), outcome.message().green()),
    }
}

/// Print a logbook error the way the session reports it
pub fn print_error(err: &LogbookError) {
    println!("{} {}", "Error:".red().bold(), err.to_string().red());
    if let Some(hint) = error_hint(err) {
        println!("  {}", hint.dimmed());
    }
}

/// Follow-up line for failures the user cannot fix by retyping input
fn error_hint(err: &LogbookError) -> Option<&'static str> {
    if err.is_user_error() {
        None
    } else {
        Some("Check that the destination is writable and try again.")
    }
}
