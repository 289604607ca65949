//! Error types for the logbook core
//!
//! Every variant is recoverable: the session loop prints it and carries on.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for logbook operations
pub type LogbookResult<T> = Result<T, LogbookError>;

/// Main error type for logbook operations
#[derive(Error, Debug)]
pub enum LogbookError {
    /// Input was rejected before any state changed
    #[error("{0}")]
    Validation(String),

    /// Delete invoked without a valid selection
    #[error("{0}")]
    NotFound(String),

    /// Timezone identifier unknown to the registry
    #[error("Invalid timezone '{name}'. Please try again.")]
    InvalidTimezone { name: String },

    /// Writing the export file failed
    #[error("Failed to export to {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LogbookError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        LogbookError::Validation(message.into())
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        LogbookError::NotFound(message.into())
    }

    /// True for errors caused by user input rather than the environment
    pub fn is_user_error(&self) -> bool {
        !matches!(self, LogbookError::Export { .. })
    }
}
