//! Application state and the action dispatcher.
//!
//! The presentation layer never touches the registry or the log directly: it
//! builds an [`Action`] from user input and passes it to [`AppState::dispatch`].

use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;

use crate::error::{LogbookError, LogbookResult};
use crate::export::{self, CsvExporter, TabularExporter};
use crate::model::KillChainStep;
use crate::oplog::OperationLog;
use crate::registry::AssetRegistry;
use crate::settings::AppConfig;
use crate::timezone::{ActiveTimezone, IanaDatabase, TimezoneRegistry};

/// A user request against the logbook
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddAsset {
        name: String,
    },
    /// `None` means nothing was selected
    RemoveAsset {
        position: Option<usize>,
    },
    LogOperation {
        command: String,
        targets: Vec<String>,
        kill_chain_step: Option<KillChainStep>,
    },
    SetTimezone {
        name: String,
    },
    Export {
        destination: PathBuf,
    },
}

/// Result of a successful action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    AssetAdded { name: String },
    AssetRemoved { name: String },
    OperationLogged { line: String },
    TimezoneChanged { name: &'static str },
    Exported { path: PathBuf, rows: usize },
}

impl Outcome {
    /// Confirmation shown to the user
    pub fn message(&self) -> String {
        match self {
            Outcome::AssetAdded { name } => format!("Added asset '{name}'"),
            Outcome::AssetRemoved { name } => format!("Deleted asset '{name}'"),
            Outcome::OperationLogged { line } => format!("Logged: {line}"),
            Outcome::TimezoneChanged { name } => format!("Timezone set to {name}"),
            Outcome::Exported { path, .. } => format!("Data exported to {}", path.display()),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Everything a logging session holds
pub struct AppState {
    assets: AssetRegistry,
    log: OperationLog,
    timezone: ActiveTimezone,
    timezones: Box<dyn TimezoneRegistry>,
    exporter: Box<dyn TabularExporter>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Empty state, UTC active, IANA database and CSV export
    pub fn new() -> Self {
        Self::with_collaborators(Box::new(IanaDatabase), Box::new(CsvExporter))
    }

    pub fn with_collaborators(
        timezones: Box<dyn TimezoneRegistry>,
        exporter: Box<dyn TabularExporter>,
    ) -> Self {
        Self {
            assets: AssetRegistry::new(),
            log: OperationLog::new(),
            timezone: ActiveTimezone::default(),
            timezones,
            exporter,
        }
    }

    /// Empty state with the configured default timezone active
    ///
    /// # Errors
    /// Returns an invalid-timezone error if the configured default is unknown
    pub fn from_config(config: &AppConfig) -> LogbookResult<Self> {
        let mut state = Self::new();
        state
            .timezone
            .set_active(state.timezones.as_ref(), &config.default_timezone)?;
        Ok(state)
    }

    /// Like [`AppState::from_config`], but an unknown configured timezone
    /// leaves UTC active and hands the error back for display
    pub fn from_config_or_utc(config: &AppConfig) -> (Self, Option<LogbookError>) {
        match Self::from_config(config) {
            Ok(state) => (state, None),
            Err(err) => (Self::new(), Some(err)),
        }
    }

    pub fn assets(&self) -> &AssetRegistry {
        &self.assets
    }

    pub fn log(&self) -> &OperationLog {
        &self.log
    }

    pub fn timezone(&self) -> &ActiveTimezone {
        &self.timezone
    }

    pub fn timezones(&self) -> &dyn TimezoneRegistry {
        self.timezones.as_ref()
    }

    /// Apply `action` using the current clock
    pub fn dispatch(&mut self, action: Action) -> LogbookResult<Outcome> {
        self.dispatch_at(action, Utc::now())
    }

    /// Apply `action` as if it happened at `now`
    pub fn dispatch_at(&mut self, action: Action, now: DateTime<Utc>) -> LogbookResult<Outcome> {
        let outcome = match action {
            Action::AddAsset { name } => {
                self.assets.add(&name)?;
                Outcome::AssetAdded {
                    name: name.trim().to_string(),
                }
            }
            Action::RemoveAsset { position } => {
                let asset = self.assets.remove(position)?;
                Outcome::AssetRemoved {
                    name: asset.name().to_string(),
                }
            }
            Action::LogOperation {
                command,
                targets,
                kill_chain_step,
            } => {
                self.log
                    .log(&command, &targets, kill_chain_step, self.timezone.tz(), now)?;
                let line = self
                    .log
                    .last()
                    .map(OperationLog::render_line)
                    .unwrap_or_default();
                Outcome::OperationLogged { line }
            }
            Action::SetTimezone { name } => {
                let name = self.timezone.set_active(self.timezones.as_ref(), &name)?;
                Outcome::TimezoneChanged { name }
            }
            Action::Export { destination } => {
                let path =
                    export::export_with(self.exporter.as_ref(), self.log.entries(), &destination)?;
                Outcome::Exported {
                    path,
                    rows: self.log.len(),
                }
            }
        };

        log::info!("{}", outcome.message());
        Ok(outcome)
    }
}
