//! End-to-end flows through the action dispatcher.

use chrono::{DateTime, TimeZone, Utc};
use redteam_logbook::model::KillChainStep;
use redteam_logbook::{Action, AppState, LogbookError, Outcome};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, h, m, 0).unwrap()
}

fn add(state: &mut AppState, name: &str) {
    state
        .dispatch(Action::AddAsset {
            name: name.to_string(),
        })
        .unwrap();
}

fn log_op(
    state: &mut AppState,
    command: &str,
    targets: &[&str],
    step: Option<KillChainStep>,
    now: DateTime<Utc>,
) {
    state
        .dispatch_at(
            Action::LogOperation {
                command: command.to_string(),
                targets: targets.iter().map(|s| s.to_string()).collect(),
                kill_chain_step: step,
            },
            now,
        )
        .unwrap();
}

#[test]
fn test_server_scenario_exports_two_lines() {
    let temp = TempDir::new().unwrap();
    let mut state = AppState::new();

    add(&mut state, "Server-A");
    add(&mut state, "Server-B");
    log_op(&mut state, "nmap -sV", &["Server-A"], Some(KillChainStep::Discovery), at(17, 30));

    assert_eq!(state.log().len(), 1);
    let entry = &state.log().entries()[0];
    assert_eq!(entry.targets_joined(), "Server-A");
    assert_eq!(entry.kill_chain_step(), "Discovery");

    let outcome = state
        .dispatch(Action::Export {
            destination: temp.path().join("ops.csv"),
        })
        .unwrap();

    let Outcome::Exported { path, rows } = outcome else {
        panic!("expected an export outcome");
    };
    assert_eq!(rows, 1);

    let contents = fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Timestamp,Command,Targets,Kill Chain Step",
            "2024-01-15 05:30:00 PM,nmap -sV,Server-A,Discovery",
        ]
    );
}

#[test]
fn test_timezone_change_does_not_rewrite_history() {
    let mut state = AppState::new();
    add(&mut state, "x");

    log_op(&mut state, "first", &["x"], None, at(17, 30));
    let first_before = state.log().entries()[0].timestamp().to_string();

    let outcome = state
        .dispatch(Action::SetTimezone {
            name: "America/New_York".to_string(),
        })
        .unwrap();
    assert_eq!(
        outcome,
        Outcome::TimezoneChanged {
            name: "America/New_York"
        }
    );

    log_op(&mut state, "second", &["x"], None, at(17, 30));

    let entries = state.log().entries();
    assert_eq!(entries[0].timestamp(), first_before);
    assert_eq!(entries[0].timestamp(), "2024-01-15 05:30:00 PM");
    assert_eq!(entries[1].timestamp(), "2024-01-15 12:30:00 PM");
}

#[test]
fn test_invalid_timezone_keeps_active() {
    let mut state = AppState::new();

    let result = state.dispatch(Action::SetTimezone {
        name: "Not/AZone".to_string(),
    });

    assert!(matches!(result, Err(LogbookError::InvalidTimezone { .. })));
    assert_eq!(state.timezone().name(), "UTC");
}

#[test]
fn test_remove_reports_deleted_name() {
    let mut state = AppState::new();
    add(&mut state, "Server-A");
    add(&mut state, "Server-B");

    let outcome = state
        .dispatch(Action::RemoveAsset { position: Some(1) })
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::AssetRemoved {
            name: "Server-B".to_string()
        }
    );
    assert_eq!(state.assets().list(), vec!["Server-A"]);
}

#[test]
fn test_errors_leave_state_untouched() {
    let mut state = AppState::new();
    add(&mut state, "Server-A");

    let failures = vec![
        Action::AddAsset {
            name: "  ".to_string(),
        },
        Action::RemoveAsset { position: None },
        Action::LogOperation {
            command: "".to_string(),
            targets: vec!["Server-A".to_string()],
            kill_chain_step: None,
        },
        Action::LogOperation {
            command: "scan".to_string(),
            targets: vec![],
            kill_chain_step: None,
        },
        Action::Export {
            destination: Path::new("unused.csv").to_path_buf(),
        },
    ];

    for action in failures {
        let err = state.dispatch(action).unwrap_err();
        assert!(err.is_user_error(), "unexpected error kind: {err:?}");
    }

    assert_eq!(state.assets().list(), vec!["Server-A"]);
    assert!(state.log().is_empty());
    assert!(!Path::new("unused.csv").exists());
}

#[test]
fn test_targets_not_checked_against_registry() {
    let mut state = AppState::new();

    log_op(&mut state, "ping", &["never-added"], None, at(9, 0));

    assert_eq!(state.log().entries()[0].targets(), &["never-added"]);
}

#[test]
fn test_logged_outcome_carries_display_line() {
    let mut state = AppState::new();
    add(&mut state, "ws1");

    let outcome = state
        .dispatch_at(
            Action::LogOperation {
                command: "whoami /priv".to_string(),
                targets: vec!["ws1".to_string()],
                kill_chain_step: Some(KillChainStep::PrivilegeEscalation),
            },
            at(9, 15),
        )
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::OperationLogged {
            line: "2024-01-15 09:15:00 AM : whoami /priv (Targets: ws1, Kill Chain: Privilege Escalation)"
                .to_string()
        }
    );
}
