use chrono_tz::{Tz, TZ_VARIANTS};

use crate::error::{LogbookError, LogbookResult};

/// Identifier active when nothing else has been selected
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Source of valid timezone identifiers
pub trait TimezoneRegistry {
    /// Resolve a name to its timezone rule
    fn resolve(&self, name: &str) -> Option<Tz>;

    /// Every known identifier, sorted
    fn identifiers(&self) -> Vec<&'static str>;

    /// Identifiers containing `query`, ignoring case
    fn search(&self, query: &str) -> Vec<&'static str> {
        let query = query.trim().to_lowercase();
        self.identifiers()
            .into_iter()
            .filter(|id| id.to_lowercase().contains(&query))
            .collect()
    }
}

/// IANA timezone database compiled into `chrono-tz`
#[derive(Debug, Default, Clone, Copy)]
pub struct IanaDatabase;

impl TimezoneRegistry for IanaDatabase {
    fn resolve(&self, name: &str) -> Option<Tz> {
        Tz::from_str_insensitive(name.trim()).ok()
    }

    fn identifiers(&self) -> Vec<&'static str> {
        let mut ids: Vec<&'static str> = TZ_VARIANTS.iter().map(|tz| tz.name()).collect();
        ids.sort_unstable();
        ids
    }
}

/// The timezone used to stamp newly logged operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveTimezone {
    tz: Tz,
}

impl Default for ActiveTimezone {
    fn default() -> Self {
        Self { tz: Tz::UTC }
    }
}

impl ActiveTimezone {
    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// Canonical identifier of the active timezone
    pub fn name(&self) -> &'static str {
        self.tz.name()
    }

    /// Switch to `name`, returning its canonical identifier
    ///
    /// # Errors
    /// Returns an invalid-timezone error if the registry does not know `name`;
    /// the active timezone is left unchanged
    pub fn set_active(
        &mut self,
        registry: &dyn TimezoneRegistry,
        name: &str,
    ) -> LogbookResult<&'static str> {
        let tz = registry
            .resolve(name)
            .ok_or_else(|| LogbookError::InvalidTimezone {
                name: name.trim().to_string(),
            })?;

        self.tz = tz;
        Ok(self.name())
    }
}
