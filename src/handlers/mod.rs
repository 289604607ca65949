//! Command handler modules
//!
//! This module contains the command handler functions called from main.rs,
//! organized by functionality area.

pub mod catalog;
pub mod config;
pub mod session;

// Re-export all public handler functions for convenient use
pub use catalog::{handle_kill_chain, handle_timezones};
pub use config::{handle_config_interactive, handle_config_show, handle_config_update};
pub use session::{is_interactive, print_error, run_session};
