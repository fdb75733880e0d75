//! Capability interfaces and the components that implement them
//!
//! - `InventoryComponent` / `TankComponent`: the contracts every wrapped
//!   inventory or tank satisfies
//! - `Simple*`: plain fixed-capacity storage
//! - `Synced`: storage that schedules a host sync after committed changes
//! - `ComponentRef`: capability object over a component stored elsewhere

pub mod inventory;
pub mod provider;
pub mod shared;
pub mod simple_inventory;
pub mod simple_tank;
pub mod synced;
pub mod tank;

pub use inventory::InventoryComponent;
pub use provider::{ComponentProvider, ItemComponentProvider};
pub use shared::{ComponentRef, SharedInventory, SharedTank};
pub use simple_inventory::SimpleInventoryComponent;
pub use simple_tank::SimpleTankComponent;
pub use synced::{SyncHandle, Synced, SyncedInventoryComponent, SyncedTankComponent};
pub use tank::TankComponent;
