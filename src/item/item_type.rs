use serde::{Deserialize, Serialize};

use super::SharedStack;
use crate::compat::capability::{Capability, CapabilityKind};
use crate::compat::item_inventory::ItemInventory;
use crate::component::ItemComponentProvider;

/// Maximum items in a single stack unless the item says otherwise
pub const MAX_STACK_SIZE: u32 = 64;

/// Unique identifier for an item type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

/// An item type shared by every stack of it
///
/// Items are registered once at load time and shared behind `Arc`. The
/// `component_provider`, `as_item_inventory` and `capability` methods are how
/// hooks ask whether an item takes part in a given framework; the defaults
/// opt out of all of them.
pub trait Item: Send + Sync {
    fn id(&self) -> ItemId;

    fn name(&self) -> &str;

    fn max_stack_size(&self) -> u32 {
        MAX_STACK_SIZE
    }

    /// Item component framework attachment
    fn component_provider(&self) -> Option<&dyn ItemComponentProvider> {
        None
    }

    /// Per-stack inventory storage for items like bags and backpacks
    fn as_item_inventory(&self) -> Option<&dyn ItemInventory> {
        None
    }

    /// Capability framework lookup for a stack of this item
    fn capability(&self, _stack: &SharedStack, _kind: CapabilityKind) -> Option<Capability> {
        None
    }
}

/// Common item IDs
impl ItemId {
    // Materials (1000-1999)
    pub const STICK: ItemId = ItemId(1000);
    pub const COAL: ItemId = ItemId(1001);
    pub const DIAMOND: ItemId = ItemId(1004);

    // Containers (4000-4999)
    pub const BUCKET: ItemId = ItemId(4000);
    pub const BACKPACK: ItemId = ItemId(4001);
}
