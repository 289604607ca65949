use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use redteam_logbook::app::{Action, AppState};
use redteam_logbook::handlers;
use redteam_logbook::logger;
use redteam_logbook::settings::AppConfig;

#[derive(Parser)]
#[command(name = "redteam-logbook")]
#[command(about = "Record red team operations against tracked assets and export them to CSV", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive logging session (default)
    Session {
        /// Timezone to start in (overrides the configured default)
        #[arg(short, long)]
        timezone: Option<String>,
    },

    /// List known timezone identifiers
    Timezones {
        /// Only show identifiers containing this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// List the kill chain steps operations can be tagged with
    KillChain,

    /// Configure session settings
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Timezone active when a session starts
        #[arg(long)]
        default_timezone: Option<String>,

        /// Directory offered for exports (empty to clear)
        #[arg(long)]
        export_dir: Option<PathBuf>,

        /// File name offered for exports
        #[arg(long)]
        export_file_name: Option<String>,

        /// Ask before overwriting an existing export
        #[arg(long)]
        confirm_overwrite: Option<bool>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logger::rotate_log_if_needed()?;
    logger::init_logger()?;

    match cli.command.unwrap_or(Commands::Session { timezone: None }) {
        Commands::Session { timezone } => {
            let config = AppConfig::load().context("Failed to load configuration")?;

            // An unknown timezone leaves UTC active instead of ending the session
            let (mut state, config_err) = AppState::from_config_or_utc(&config);
            if let Some(err) = config_err {
                handlers::print_error(&err);
            }
            if let Some(name) = timezone {
                if let Err(err) = state.dispatch(Action::SetTimezone { name }) {
                    handlers::print_error(&err);
                }
            }

            handlers::run_session(&mut state, &config)?;
        }
        Commands::Timezones { filter } => {
            handlers::handle_timezones(filter.as_deref())?;
        }
        Commands::KillChain => {
            handlers::handle_kill_chain()?;
        }
        Commands::Config {
            show,
            default_timezone,
            export_dir,
            export_file_name,
            confirm_overwrite,
        } => {
            let has_updates = default_timezone.is_some()
                || export_dir.is_some()
                || export_file_name.is_some()
                || confirm_overwrite.is_some();

            if show {
                handlers::handle_config_show()?;
            } else if has_updates {
                handlers::handle_config_update(
                    default_timezone,
                    export_dir,
                    export_file_name,
                    confirm_overwrite,
                )?;
            } else {
                handlers::handle_config_interactive()?;
            }
        }
    }

    Ok(())
}
