//! Reference listing handlers
//!
//! Prints the timezone identifiers and kill-chain stages a session accepts.

use anyhow::Result;
use colored::Colorize;

use crate::model::KillChainStep;
use crate::timezone::{IanaDatabase, TimezoneRegistry};

/// Handle `timezones [--filter TEXT]`
pub fn handle_timezones(filter: Option<&str>) -> Result<()> {
    let identifiers = match filter {
        Some(query) => IanaDatabase.search(query),
        None => IanaDatabase.identifiers(),
    };

    if identifiers.is_empty() {
        println!(
            "{}",
            format!("No timezone matches '{}'", filter.unwrap_or_default()).yellow()
        );
        return Ok(());
    }

    for id in &identifiers {
        println!("{id}");
    }
    log::debug!("Listed {} timezones", identifiers.len());

    Ok(())
}

/// Handle `kill-chain`
pub fn handle_kill_chain() -> Result<()> {
    println!("{}", "Kill Chain Steps".cyan().bold());
    for (idx, step) in KillChainStep::ALL.iter().enumerate() {
        println!("  {:>2}. {}", idx + 1, step);
    }
    Ok(())
}
