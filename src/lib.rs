//! Inventory and fluid-tank discovery across independently loaded mods
//!
//! Mods register hooks with the [`helper`] registries; anyone can then ask
//! "is there an inventory at this block" or "does this stack hold fluid"
//! without knowing which framework answers. [`integration`] installs the
//! built-in bridges in [`compat`] for whichever frameworks are loaded.

pub mod action;
pub mod compat;
pub mod component;
pub mod config;
pub mod error;
pub mod fluid;
pub mod helper;
pub mod integration;
pub mod item;
pub mod world;

pub use action::ActionType;
pub use component::{
    ComponentProvider, ComponentRef, InventoryComponent, ItemComponentProvider, SharedInventory,
    SharedTank, SimpleInventoryComponent, SimpleTankComponent, SyncHandle, Synced,
    SyncedInventoryComponent, SyncedTankComponent, TankComponent,
};
pub use config::ComponentsConfig;
pub use error::{ComponentError, ComponentResult};
pub use fluid::{FluidId, FluidVolume, BUCKET};
pub use helper::{
    BlockHook, ComponentHelper, DualHook, Hook, InventoryComponentHelper, ItemHook,
    TankComponentHelper,
};
pub use integration::{
    init, registries, run_if_present, Integration, ModList, Registries, BUILTIN_INTEGRATIONS,
};
pub use item::{Item, ItemId, ItemStack, SharedStack, MAX_STACK_SIZE};
pub use world::{BlockEntity, BlockFace, Entity, EntityId, VoxelPos, WorldView};
