use crate::error::{LogbookError, LogbookResult};

use super::kill_chain::{KillChainStep, NOT_APPLICABLE};

/// Record of a single operation
///
/// Fields are fixed at creation; the timestamp keeps the timezone that was
/// active when the operation was logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    timestamp: String,
    command: String,
    targets: Vec<String>,
    kill_chain_step: Option<KillChainStep>,
}

impl Operation {
    /// Create a new operation with validation
    ///
    /// The command is trimmed. Without a kill-chain step the operation
    /// reports `N/A`.
    ///
    /// # Errors
    /// Returns a validation error unless both the command and at least one
    /// target are present
    pub fn new(
        timestamp: String,
        command: &str,
        targets: Vec<String>,
        kill_chain_step: Option<KillChainStep>,
    ) -> LogbookResult<Self> {
        let command = command.trim();
        if command.is_empty() || targets.is_empty() {
            return Err(LogbookError::validation(
                "Command and Targeted Assets cannot be empty.",
            ));
        }

        Ok(Self {
            timestamp,
            command: command.to_string(),
            targets,
            kill_chain_step,
        })
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// Stage label, or `N/A` when none was chosen
    pub fn kill_chain_step(&self) -> &'static str {
        self.kill_chain_step
            .map(|step| step.label())
            .unwrap_or(NOT_APPLICABLE)
    }

    /// Targets as a single field, joined with `", "`
    pub fn targets_joined(&self) -> String {
        self.targets.join(", ")
    }

    /// One display line for the log view
    pub fn render_line(&self) -> String {
        format!(
            "{} : {} (Targets: {}, Kill Chain: {})",
            self.timestamp,
            self.command,
            self.targets_joined(),
            self.kill_chain_step()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_operation_creation() {
        let op = Operation::new(
            "2024-01-15 05:30:00 PM".to_string(),
            "  nmap -sV 10.0.0.5 ",
            targets(&["Server-A", "Server-B"]),
            Some(KillChainStep::Discovery),
        )
        .unwrap();

        assert_eq!(op.command(), "nmap -sV 10.0.0.5");
        assert_eq!(op.targets(), &["Server-A", "Server-B"]);
        assert_eq!(op.kill_chain_step(), "Discovery");
        assert_eq!(op.targets_joined(), "Server-A, Server-B");
    }

    #[test]
    fn test_operation_validation() {
        let result = Operation::new("t".to_string(), "   ", targets(&["x"]), None);
        assert!(matches!(result, Err(LogbookError::Validation(_))));

        let result = Operation::new("t".to_string(), "scan", Vec::new(), None);
        assert!(matches!(result, Err(LogbookError::Validation(_))));
    }

    #[test]
    fn test_empty_kill_chain_is_not_applicable() {
        let op = Operation::new("t".to_string(), "whoami", targets(&["ws1"]), None).unwrap();
        assert_eq!(op.kill_chain_step(), NOT_APPLICABLE);
    }

    #[test]
    fn test_render_line() {
        let op = Operation::new(
            "2024-01-15 05:30:00 PM".to_string(),
            "nmap -sV",
            targets(&["Server-A", "Server-B"]),
            Some(KillChainStep::Discovery),
        )
        .unwrap();

        assert_eq!(
            op.render_line(),
            "2024-01-15 05:30:00 PM : nmap -sV (Targets: Server-A, Server-B, Kill Chain: Discovery)"
        );
    }
}
