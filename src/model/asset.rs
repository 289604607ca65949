use uuid::Uuid;

use crate::error::{LogbookError, LogbookResult};

/// A named system or resource that operations can target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    id: Uuid,
    name: String,
}

impl Asset {
    /// Create a new asset, trimming the name
    ///
    /// # Errors
    /// Returns a validation error if the trimmed name is empty
    pub fn new(name: &str) -> LogbookResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LogbookError::validation("Asset cannot be empty."));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_name_is_trimmed() {
        let asset = Asset::new("  Server-A \t").unwrap();
        assert_eq!(asset.name(), "Server-A");
    }

    #[test]
    fn test_asset_validation() {
        let result = Asset::new("   ");
        assert!(matches!(result, Err(LogbookError::Validation(_))));
    }

    #[test]
    fn test_duplicate_names_get_distinct_ids() {
        let a = Asset::new("dc01").unwrap();
        let b = Asset::new("dc01").unwrap();
        assert_eq!(a.name(), b.name());
        assert_ne!(a.id(), b.id());
    }
}
