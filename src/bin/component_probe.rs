//! Bootstrap the component registries and report what got installed
//!
//! Loaded mods come from `EARTH_MODS` (comma separated). An optional first
//! argument names a TOML config file.

use std::collections::HashSet;
use std::rc::Rc;

use anyhow::Context;
use earth_components::compat::{BasicContainer, SharedContainer};
use earth_components::{
    init, BlockEntity, ComponentsConfig, ItemId, VoxelPos, WorldView, BUILTIN_INTEGRATIONS,
};

/// A single chest at the origin
struct ProbeWorld {
    chest: Rc<Chest>,
}

struct Chest {
    slots: SharedContainer,
}

impl BlockEntity for Chest {
    fn position(&self) -> VoxelPos {
        VoxelPos::new(0, 0, 0)
    }

    fn container(&self) -> Option<SharedContainer> {
        Some(self.slots.clone())
    }
}

impl WorldView for ProbeWorld {
    fn block_entity(&self, pos: VoxelPos) -> Option<Rc<dyn BlockEntity>> {
        if pos == self.chest.position() {
            Some(self.chest.clone() as Rc<dyn BlockEntity>)
        } else {
            None
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mods: HashSet<String> = std::env::var("EARTH_MODS")
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    let config = match std::env::args().nth(1) {
        Some(path) => ComponentsConfig::load(&path)
            .with_context(|| format!("loading config from {}", path))?,
        None => ComponentsConfig::default(),
    };

    println!("Known integrations:");
    for integration in BUILTIN_INTEGRATIONS {
        let state = if !mods.contains(integration.mod_id) {
            "absent"
        } else if config.is_disabled(integration.mod_id) {
            "disabled"
        } else {
            "installed"
        };
        println!("  {:<24} {:<10} {}", integration.mod_id, state, integration.description);
    }

    let registries =
        init(&mods, &config, |_| Ok(())).context("bootstrapping component registries")?;
    println!("\nInventory block hooks: {:?}", registries.inventories.block_hook_ids());
    println!("Inventory item hooks:  {:?}", registries.inventories.item_hook_ids());
    println!("Tank block hooks:      {:?}", registries.tanks.block_hook_ids());
    println!("Tank item hooks:       {:?}", registries.tanks.item_hook_ids());

    let world = ProbeWorld {
        chest: Rc::new(Chest {
            slots: BasicContainer::new(config.fallback_inventory_size).into_shared(),
        }),
    };
    let origin = VoxelPos::new(0, 0, 0);
    match registries.inventories.get_block_component(&world, origin, None, None)? {
        Some(chest) => {
            log::debug!("[component_probe] chest resolved, empty = {}", chest.is_empty());
            println!(
                "\nChest at {:?}: {} slots, {} coal",
                origin,
                chest.size(),
                chest.amount_of(ItemId::COAL)
            );
        }
        None => println!("\nNo inventory found at {:?}", origin),
    }

    Ok(())
}
