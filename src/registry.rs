use uuid::Uuid;

use crate::error::{LogbookError, LogbookResult};
use crate::model::Asset;

/// Ordered collection of assets plus the list offered when picking targets
///
/// The selection surface mirrors the asset list on add. On delete the asset
/// is removed by position but the selection entry is removed by value (first
/// match), so with duplicate names the two lists can drift apart in order.
#[derive(Debug, Default, Clone)]
pub struct AssetRegistry {
    assets: Vec<Asset>,
    selectable: Vec<String>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset by name
    ///
    /// # Errors
    /// Returns a validation error if the trimmed name is empty
    pub fn add(&mut self, name: &str) -> LogbookResult<()> {
        let asset = Asset::new(name)?;
        log::debug!("Adding asset '{}' ({})", asset.name(), asset.id());

        self.selectable.push(asset.name().to_string());
        self.assets.push(asset);
        Ok(())
    }

    /// Remove the asset at `position`
    ///
    /// # Errors
    /// Returns a not-found error when nothing is selected or the position is
    /// out of range
    pub fn remove(&mut self, position: Option<usize>) -> LogbookResult<Asset> {
        let index = position
            .filter(|&i| i < self.assets.len())
            .ok_or_else(|| LogbookError::not_found("No asset selected to delete."))?;

        let asset = self.assets.remove(index);
        if let Some(pos) = self.selectable.iter().position(|n| n == asset.name()) {
            self.selectable.remove(pos);
        }

        log::debug!("Removed asset '{}' at position {}", asset.name(), index);
        Ok(asset)
    }

    /// Remove an asset by its generated id
    pub fn remove_by_id(&mut self, id: Uuid) -> LogbookResult<Asset> {
        let position = self.assets.iter().position(|a| a.id() == id);
        if position.is_none() {
            return Err(LogbookError::not_found(format!("No asset with id {id}.")));
        }
        self.remove(position)
    }

    /// Snapshot of asset names in insertion order
    pub fn list(&self) -> Vec<String> {
        self.assets.iter().map(|a| a.name().to_string()).collect()
    }

    /// Names offered when choosing operation targets
    pub fn selectable_targets(&self) -> &[String] {
        &self.selectable
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
