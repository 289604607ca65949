use std::fmt;
use std::str::FromStr;

use crate::error::LogbookError;

/// Stored in place of a kill-chain step when none was chosen
pub const NOT_APPLICABLE: &str = "N/A";

/// Attack-lifecycle stage an operation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KillChainStep {
    InitialAccess,
    Execution,
    Persistence,
    PrivilegeEscalation,
    DefenseEvasion,
    CredentialAccess,
    Discovery,
    LateralMovement,
    Collection,
    Exfiltration,
    CommandAndControl,
}

impl KillChainStep {
    /// Every stage, in lifecycle order
    pub const ALL: [KillChainStep; 11] = [
        KillChainStep::InitialAccess,
        KillChainStep::Execution,
        KillChainStep::Persistence,
        KillChainStep::PrivilegeEscalation,
        KillChainStep::DefenseEvasion,
        KillChainStep::CredentialAccess,
        KillChainStep::Discovery,
        KillChainStep::LateralMovement,
        KillChainStep::Collection,
        KillChainStep::Exfiltration,
        KillChainStep::CommandAndControl,
    ];

    /// Label as written to the log and the CSV export
    pub fn label(&self) -> &'static str {
        match self {
            KillChainStep::InitialAccess => "Initial Access",
            KillChainStep::Execution => "Execution",
            KillChainStep::Persistence => "Persistence",
            KillChainStep::PrivilegeEscalation => "Privilege Escalation",
            KillChainStep::DefenseEvasion => "Defense Evasion",
            KillChainStep::CredentialAccess => "Credential Access",
            KillChainStep::Discovery => "Discovery",
            KillChainStep::LateralMovement => "Lateral Movement",
            KillChainStep::Collection => "Collection",
            KillChainStep::Exfiltration => "Exfiltration",
            KillChainStep::CommandAndControl => "Command and Control",
        }
    }
}

impl fmt::Display for KillChainStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for KillChainStep {
    type Err = LogbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        KillChainStep::ALL
            .iter()
            .copied()
            .find(|step| step.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                LogbookError::validation(format!("Unknown kill chain step '{wanted}'."))
            })
    }
}
