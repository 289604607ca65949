//! # redteam-logbook
//!
//! A terminal tool for keeping a timestamped record of red team operations.
//!
//! ## Overview
//!
//! An operator maintains a list of assets (hosts, services, accounts) and logs
//! each command run against one or more of them, optionally tagged with a
//! kill-chain stage. Timestamps are rendered in a selectable timezone at the
//! moment of logging. The log lives in memory for the session and is exported
//! to CSV on demand.
//!
//! ## Architecture
//!
//! - Domain records and collections ([`model`], [`registry`], [`oplog`])
//! - Timezone lookup and the active timezone ([`timezone`])
//! - CSV export ([`export`])
//! - Application state and the action dispatcher ([`app`])
//! - Settings, paths and logging ([`settings`], [`config`], [`logger`])
//! - Interactive terminal front end ([`handlers`])

/// Session state and the single entry point for user actions.
///
/// User input is turned into an [`app::Action`] and applied through
/// [`app::AppState::dispatch`], which returns a confirmation [`app::Outcome`]
/// or a [`error::LogbookError`].
pub mod app;

/// Platform-agnostic configuration directory management.
///
/// Locates the settings file and the session log following platform
/// conventions (XDG on Linux, Application Support on macOS, AppData on Windows).
pub mod config;

/// Error taxonomy shared by every logbook operation.
pub mod error;

/// CSV export of the operation log.
pub mod export;

/// Command handlers for the binary, including the interactive session.
pub mod handlers;

/// Logging configuration and utilities.
///
/// Console logging through `env_logger` (controlled by `RUST_LOG`) plus an
/// append-only session log in the config directory with size-based rotation.
pub mod logger;

/// Assets, operations and kill-chain stages.
pub mod model;

/// Append-only operation log and timestamp formatting.
pub mod oplog;

/// Ordered asset collection and the target selection list.
pub mod registry;

/// User settings persisted as TOML.
pub mod settings;

/// Timezone database access and the active timezone.
pub mod timezone;

pub use app::{Action, AppState, Outcome};
pub use error::{LogbookError, LogbookResult};
