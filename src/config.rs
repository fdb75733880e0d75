//! Component system configuration
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no file
//! at all) gives the stock behaviour.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::component::{SyncHandle, SyncedInventoryComponent, SyncedTankComponent};
use crate::error::ComponentResult;
use crate::fluid::BUCKET;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentsConfig {
    /// Integration mod ids to skip even when the mod is loaded
    pub disabled_integrations: Vec<String>,
    /// Slots in the fallback inventory
    pub fallback_inventory_size: usize,
    pub fallback_tank_count: usize,
    /// Capacity of each fallback tank, in millibuckets
    pub fallback_tank_capacity: u64,
}

impl Default for ComponentsConfig {
    fn default() -> Self {
        Self {
            disabled_integrations: Vec::new(),
            fallback_inventory_size: 27,
            fallback_tank_count: 1,
            fallback_tank_capacity: 4 * BUCKET,
        }
    }
}

impl ComponentsConfig {
    pub fn from_toml_str(raw: &str) -> ComponentResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Load a TOML config file
    pub fn load(path: impl AsRef<Path>) -> ComponentResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&raw)?;
        log::debug!("[ComponentsConfig] loaded {}", path.display());
        Ok(config)
    }

    pub fn is_disabled(&self, mod_id: &str) -> bool {
        self.disabled_integrations.iter().any(|id| id == mod_id)
    }

    /// Synced inventory for owners no framework provides storage for
    pub fn fallback_inventory<S: SyncHandle>(&self, sync: S) -> SyncedInventoryComponent<S> {
        SyncedInventoryComponent::with_size(self.fallback_inventory_size, sync)
    }

    pub fn fallback_tank<S: SyncHandle>(&self, sync: S) -> SyncedTankComponent<S> {
        SyncedTankComponent::with_tanks(self.fallback_tank_count, self.fallback_tank_capacity, sync)
    }
}
