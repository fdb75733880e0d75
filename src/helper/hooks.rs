use crate::error::ComponentResult;
use crate::item::SharedStack;
use crate::world::{BlockFace, VoxelPos, WorldView};

/// Identity shared by every hook kind
///
/// The id is what a hook passes as the ignore token when it queries the
/// registry from inside its own resolution, so it must be stable.
pub trait Hook: Send + Sync {
    fn id(&self) -> &str;
}

/// Finds components on a block, or on an entity standing in it
///
/// `C` is the capability trait object handed back, e.g.
/// `dyn InventoryComponent`.
pub trait BlockHook<C: ?Sized>: Hook {
    /// Test for a compatible component. Must not allocate or mutate.
    fn has_component(&self, world: &dyn WorldView, pos: VoxelPos, dir: Option<BlockFace>) -> bool;

    /// Build a fresh capability object, or `Ok(None)` if there is nothing here
    fn get_component(
        &self,
        world: &dyn WorldView,
        pos: VoxelPos,
        dir: Option<BlockFace>,
    ) -> ComponentResult<Option<Box<C>>>;
}

/// Finds components on an item stack
pub trait ItemHook<C: ?Sized>: Hook {
    /// Test for a compatible component. Must not allocate or mutate.
    fn has_component(&self, stack: &SharedStack) -> bool;

    /// Build a fresh capability object wrapping `stack`, or `Ok(None)`
    fn get_component(&self, stack: &SharedStack) -> ComponentResult<Option<Box<C>>>;
}

/// A hook serving both block/entity and item targets
pub trait DualHook<C: ?Sized>: BlockHook<C> + ItemHook<C> {}

impl<C: ?Sized, T: BlockHook<C> + ItemHook<C>> DualHook<C> for T {}
