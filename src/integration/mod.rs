//! Conditional integration bootstrap
//!
//! The set of frameworks this crate knows how to bridge is closed and listed
//! in [`BUILTIN_INTEGRATIONS`], in priority order. At startup each one whose
//! mod is loaded installs its hooks; the registries are then frozen and shared
//! for the rest of the process.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use crate::compat::{
    BlockComponentHook, CapabilityHook, ContainerHook, EntityComponentHook, ItemComponentHook,
    ItemInventoryHook,
};
use crate::config::ComponentsConfig;
use crate::error::ComponentResult;
use crate::helper::{InventoryComponentHelper, TankComponentHelper};

/// Host predicate answering "is this mod loaded"
pub trait ModList {
    fn is_loaded(&self, mod_id: &str) -> bool;
}

impl ModList for HashSet<String> {
    fn is_loaded(&self, mod_id: &str) -> bool {
        self.contains(mod_id)
    }
}

impl ModList for Vec<String> {
    fn is_loaded(&self, mod_id: &str) -> bool {
        self.iter().any(|id| id == mod_id)
    }
}

impl<'a> ModList for [&'a str] {
    fn is_loaded(&self, mod_id: &str) -> bool {
        self.iter().any(|id| *id == mod_id)
    }
}

impl<F: Fn(&str) -> bool> ModList for F {
    fn is_loaded(&self, mod_id: &str) -> bool {
        self(mod_id)
    }
}

/// Run `f` only when `mod_id` is loaded. Returns whether it ran.
pub fn run_if_present<M, F>(mods: &M, mod_id: &str, f: F) -> bool
where
    M: ModList + ?Sized,
    F: FnOnce(),
{
    if mods.is_loaded(mod_id) {
        log::debug!("[integration] '{}' present", mod_id);
        f();
        true
    } else {
        log::debug!("[integration] '{}' not present, skipping", mod_id);
        false
    }
}

/// A known framework and how to hook it in
pub struct Integration {
    pub mod_id: &'static str,
    pub description: &'static str,
    pub install: fn(&mut Registries) -> ComponentResult<()>,
}

impl std::fmt::Debug for Integration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Integration")
            .field("mod_id", &self.mod_id)
            .field("description", &self.description)
            .finish()
    }
}

pub const BLOCK_COMPONENTS_MOD: &str = "earth-components-block";
pub const ENTITY_COMPONENTS_MOD: &str = "earth-components-entity";
pub const ITEM_COMPONENTS_MOD: &str = "earth-components-item";
pub const ITEM_INVENTORY_MOD: &str = "item-inventory";
pub const CAPABILITIES_MOD: &str = "capabilities";

/// Known integrations, highest priority first
///
/// Block-native data beats entities standing in the block; component
/// frameworks beat foreign item storage.
pub const BUILTIN_INTEGRATIONS: &[Integration] = &[
    Integration {
        mod_id: BLOCK_COMPONENTS_MOD,
        description: "components attached to blocks",
        install: install_block_components,
    },
    Integration {
        mod_id: ENTITY_COMPONENTS_MOD,
        description: "components attached to entities",
        install: install_entity_components,
    },
    Integration {
        mod_id: ITEM_COMPONENTS_MOD,
        description: "components attached to item stacks",
        install: install_item_components,
    },
    Integration {
        mod_id: ITEM_INVENTORY_MOD,
        description: "per-stack item inventories",
        install: install_item_inventory,
    },
    Integration {
        mod_id: CAPABILITIES_MOD,
        description: "capability framework handlers",
        install: install_capabilities,
    },
];

fn install_block_components(registries: &mut Registries) -> ComponentResult<()> {
    registries.inventories.add_block_hook(Arc::new(BlockComponentHook))?;
    registries.tanks.add_block_hook(Arc::new(BlockComponentHook))
}

fn install_entity_components(registries: &mut Registries) -> ComponentResult<()> {
    registries.inventories.add_block_hook(Arc::new(EntityComponentHook))?;
    registries.tanks.add_block_hook(Arc::new(EntityComponentHook))
}

fn install_item_components(registries: &mut Registries) -> ComponentResult<()> {
    registries.inventories.add_item_hook(Arc::new(ItemComponentHook))?;
    registries.tanks.add_item_hook(Arc::new(ItemComponentHook))
}

fn install_item_inventory(registries: &mut Registries) -> ComponentResult<()> {
    registries.inventories.add_item_hook(Arc::new(ItemInventoryHook))
}

fn install_capabilities(registries: &mut Registries) -> ComponentResult<()> {
    let hook = Arc::new(CapabilityHook);
    registries.inventories.add_dual_hook(hook.clone())?;
    registries.tanks.add_dual_hook(hook)
}

/// The inventory and tank registries for one process
#[derive(Default)]
pub struct Registries {
    pub inventories: InventoryComponentHelper,
    pub tanks: TankComponentHelper,
}

impl Registries {
    /// Install every present integration and freeze
    pub fn bootstrap<M: ModList + ?Sized>(
        mods: &M,
        config: &ComponentsConfig,
    ) -> ComponentResult<Self> {
        Self::bootstrap_with(mods, config, |_| Ok(()))
    }

    /// Like [`Registries::bootstrap`], running `extra` after the built-in
    /// integrations and before the registries freeze
    ///
    /// Hooks added by `extra` rank below every built-in integration but above
    /// the engine container fallback.
    pub fn bootstrap_with<M, F>(
        mods: &M,
        config: &ComponentsConfig,
        extra: F,
    ) -> ComponentResult<Self>
    where
        M: ModList + ?Sized,
        F: FnOnce(&mut Registries) -> ComponentResult<()>,
    {
        let mut registries = Registries::default();

        for integration in BUILTIN_INTEGRATIONS {
            if config.is_disabled(integration.mod_id) {
                log::debug!("[integration] '{}' disabled by config", integration.mod_id);
                continue;
            }
            let mut result = Ok(());
            run_if_present(mods, integration.mod_id, || {
                log::debug!("[integration] installing {}", integration.description);
                result = (integration.install)(&mut registries);
            });
            result?;
        }

        extra(&mut registries)?;

        registries.inventories.add_block_hook(Arc::new(ContainerHook))?;
        registries.freeze();

        log::info!(
            "[integration] hooks ready: inventories {} block / {} item, tanks {} block / {} item",
            registries.inventories.block_hook_ids().len(),
            registries.inventories.item_hook_ids().len(),
            registries.tanks.block_hook_ids().len(),
            registries.tanks.item_hook_ids().len()
        );
        Ok(registries)
    }

    pub fn freeze(&mut self) {
        self.inventories.freeze();
        self.tanks.freeze();
    }
}

static REGISTRIES: OnceLock<Registries> = OnceLock::new();

/// Bootstrap the process-wide registries
///
/// Only the first call does any work; later calls return the registries it
/// built and ignore their arguments.
pub fn init<M, F>(
    mods: &M,
    config: &ComponentsConfig,
    extra: F,
) -> ComponentResult<&'static Registries>
where
    M: ModList + ?Sized,
    F: FnOnce(&mut Registries) -> ComponentResult<()>,
{
    if let Some(existing) = REGISTRIES.get() {
        log::debug!("[integration] registries already initialized");
        return Ok(existing);
    }
    let built = Registries::bootstrap_with(mods, config, extra)?;
    Ok(REGISTRIES.get_or_init(|| built))
}

/// The process-wide registries, once [`init`] has run
pub fn registries() -> Option<&'static Registries> {
    REGISTRIES.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod_list_predicates() {
        let set: HashSet<String> = ["capabilities".to_string()].into_iter().collect();
        assert!(set.is_loaded("capabilities"));
        assert!(!set.is_loaded("item-inventory"));

        let slice: &[&str] = &["item-inventory"];
        assert!(slice.is_loaded("item-inventory"));

        let closure = |id: &str| id.starts_with("earth-");
        assert!(closure.is_loaded(BLOCK_COMPONENTS_MOD));
        assert!(!closure.is_loaded(CAPABILITIES_MOD));
    }

    #[test]
    fn test_run_if_present_only_runs_for_loaded_mods() {
        let mods = vec!["item-inventory".to_string()];
        let mut ran = Vec::new();
        assert!(run_if_present(&mods, "item-inventory", || ran.push("item-inventory")));
        assert!(!run_if_present(&mods, "capabilities", || ran.push("capabilities")));
        assert_eq!(ran, vec!["item-inventory"]);
    }

    #[test]
    fn test_builtin_order_is_fixed() {
        let ids: Vec<&str> = BUILTIN_INTEGRATIONS.iter().map(|i| i.mod_id).collect();
        assert_eq!(
            ids,
            vec![
                BLOCK_COMPONENTS_MOD,
                ENTITY_COMPONENTS_MOD,
                ITEM_COMPONENTS_MOD,
                ITEM_INVENTORY_MOD,
                CAPABILITIES_MOD
            ]
        );
    }

    #[test]
    fn test_nothing_loaded_leaves_only_container_hook() {
        let mods: &[&str] = &[];
        let registries = Registries::bootstrap(mods, &ComponentsConfig::default()).unwrap();
        assert_eq!(registries.inventories.block_hook_ids(), vec![ContainerHook::ID]);
        assert!(registries.inventories.item_hook_ids().is_empty());
        assert!(registries.tanks.block_hook_ids().is_empty());
        assert!(registries.inventories.is_frozen());
        assert!(registries.tanks.is_frozen());
    }
}
