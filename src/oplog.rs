use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::LogbookResult;
use crate::model::{KillChainStep, Operation};

/// strftime pattern for operation timestamps (12-hour clock)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %I:%M:%S %p";

/// Render `now` in `tz` using [`TIMESTAMP_FORMAT`]
pub fn format_timestamp(now: DateTime<Utc>, tz: Tz) -> String {
    now.with_timezone(&tz).format(TIMESTAMP_FORMAT).to_string()
}

/// Append-only log of recorded operations, oldest first
#[derive(Debug, Default, Clone)]
pub struct OperationLog {
    entries: Vec<Operation>,
}

impl OperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an operation stamped with `now` in `active_timezone`
    ///
    /// # Errors
    /// Returns a validation error unless both the command and at least one
    /// target are present; nothing is appended in that case
    pub fn log(
        &mut self,
        command: &str,
        targets: &[String],
        kill_chain_step: Option<KillChainStep>,
        active_timezone: Tz,
        now: DateTime<Utc>,
    ) -> LogbookResult<()> {
        let timestamp = format_timestamp(now, active_timezone);
        let operation = Operation::new(timestamp, command, targets.to_vec(), kill_chain_step)?;

        log::debug!("Logged operation: {}", operation.render_line());
        self.entries.push(operation);
        Ok(())
    }

    pub fn entries(&self) -> &[Operation] {
        &self.entries
    }

    /// Display line for a single operation
    pub fn render_line(op: &Operation) -> String {
        op.render_line()
    }

    /// Display lines for the whole log
    pub fn render(&self) -> Vec<String> {
        self.entries.iter().map(Self::render_line).collect()
    }

    pub fn last(&self) -> Option<&Operation> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LogbookError;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, h, m, 0).unwrap()
    }

    #[test]
    fn test_format_timestamp_twelve_hour() {
        assert_eq!(format_timestamp(at(17, 30), Tz::UTC), "2024-01-15 05:30:00 PM");
        assert_eq!(format_timestamp(at(0, 5), Tz::UTC), "2024-01-15 12:05:00 AM");
    }

    #[test]
    fn test_format_timestamp_converts_zone() {
        // EST is UTC-5 in January; crosses into the previous day
        assert_eq!(
            format_timestamp(at(3, 0), Tz::America__New_York),
            "2024-01-14 10:00:00 PM"
        );
    }

    #[test]
    fn test_log_appends_in_order() {
        let mut log = OperationLog::new();
        let targets = vec!["Server-A".to_string()];

        log.log("first", &targets, None, Tz::UTC, at(9, 0)).unwrap();
        log.log("second", &targets, Some(KillChainStep::Execution), Tz::UTC, at(9, 1)).unwrap();

        let commands: Vec<&str> = log.entries().iter().map(|op| op.command()).collect();
        assert_eq!(commands, vec!["first", "second"]);
        assert_eq!(log.last().map(|op| op.kill_chain_step()), Some("Execution"));
    }

    #[test]
    fn test_log_rejects_without_appending() {
        let mut log = OperationLog::new();
        let result = log.log("scan", &[], None, Tz::UTC, at(9, 0));
        assert!(matches!(result, Err(LogbookError::Validation(_))));
        assert!(log.is_empty());
    }

    #[test]
    fn test_render_all_lines() {
        let mut log = OperationLog::new();
        log.log("id", &["ws1".to_string()], None, Tz::UTC, at(12, 0)).unwrap();

        assert_eq!(
            log.render(),
            vec!["2024-01-15 12:00:00 PM : id (Targets: ws1, Kill Chain: N/A)"]
        );
    }
}
