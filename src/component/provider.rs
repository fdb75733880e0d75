//! Component framework boundary
//!
//! Blocks, entities and items that carry components through the component
//! framework implement these. They hand back components already stored on
//! the target; the framework hooks wrap them into capability objects.

use super::{SharedInventory, SharedTank};
use crate::item::SharedStack;
use crate::world::BlockFace;

/// Components attached to a block or an entity
pub trait ComponentProvider {
    /// Inventory reachable from `side`, or from anywhere when `side` is `None`
    fn inventory_component(&self, _side: Option<BlockFace>) -> Option<SharedInventory> {
        None
    }

    /// Tank reachable from `side`, or from anywhere when `side` is `None`
    fn tank_component(&self, _side: Option<BlockFace>) -> Option<SharedTank> {
        None
    }
}

/// Components attached to item stacks
pub trait ItemComponentProvider: Send + Sync {
    fn inventory_component(&self, _stack: &SharedStack) -> Option<SharedInventory> {
        None
    }

    fn tank_component(&self, _stack: &SharedStack) -> Option<SharedTank> {
        None
    }
}
