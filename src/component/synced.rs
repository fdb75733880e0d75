//! Sync-aware fallback components
//!
//! A [`Synced`] wraps plain storage and tells the host to schedule a network
//! sync after every committed change. Simulated operations are pure reads:
//! they never reach the sync handle.

use super::{InventoryComponent, SimpleInventoryComponent, SimpleTankComponent, TankComponent};
use crate::action::ActionType;
use crate::error::ComponentResult;
use crate::fluid::{FluidId, FluidVolume};
use crate::item::{ItemId, ItemStack};

/// Host-provided "mark this component dirty" operation
///
/// Calls within one frame are expected to coalesce on the host side, so
/// components call this once per committed mutation without batching.
pub trait SyncHandle {
    fn mark_dirty(&self);
}

impl<F: Fn()> SyncHandle for F {
    fn mark_dirty(&self) {
        self()
    }
}

/// Component that syncs after every committed mutation
pub struct Synced<C, S> {
    inner: C,
    sync: S,
}

/// Synced slot inventory, the fallback when no framework provides one
pub type SyncedInventoryComponent<S> = Synced<SimpleInventoryComponent, S>;

/// Synced tank set, the fluid counterpart of [`SyncedInventoryComponent`]
pub type SyncedTankComponent<S> = Synced<SimpleTankComponent, S>;

impl<S: SyncHandle> SyncedInventoryComponent<S> {
    pub fn with_size(size: usize, sync: S) -> Self {
        Synced::new(SimpleInventoryComponent::new(size), sync)
    }
}

impl<S: SyncHandle> SyncedTankComponent<S> {
    pub fn with_tanks(tanks: usize, capacity: u64, sync: S) -> Self {
        Synced::new(SimpleTankComponent::new(tanks, capacity), sync)
    }
}

impl<C, S: SyncHandle> Synced<C, S> {
    pub fn new(inner: C, sync: S) -> Self {
        Self { inner, sync }
    }

    fn sync_if(&self, action: ActionType) {
        if action.should_execute() {
            self.sync.mark_dirty();
        }
    }
}

impl<C: InventoryComponent, S: SyncHandle> InventoryComponent for Synced<C, S> {
    fn size(&self) -> usize {
        self.inner.size()
    }

    fn get_stack(&self, slot: usize) -> ItemStack {
        self.inner.get_stack(slot)
    }

    fn set_stack(&mut self, slot: usize, stack: ItemStack) -> ComponentResult<()> {
        self.inner.set_stack(slot, stack)?;
        self.sync.mark_dirty();
        Ok(())
    }

    fn can_insert(&self, slot: usize) -> bool {
        self.inner.can_insert(slot)
    }

    fn can_extract(&self, slot: usize) -> bool {
        self.inner.can_extract(slot)
    }

    fn take_stack(&mut self, slot: usize, amount: u32, action: ActionType) -> ItemStack {
        let taken = self.inner.take_stack(slot, amount, action);
        self.sync_if(action);
        taken
    }

    fn remove_stack(&mut self, slot: usize, action: ActionType) -> ItemStack {
        let removed = self.inner.remove_stack(slot, action);
        self.sync_if(action);
        removed
    }

    fn insert_stack(&mut self, slot: usize, stack: ItemStack, action: ActionType) -> ItemStack {
        let remainder = self.inner.insert_stack(slot, stack, action);
        self.sync_if(action);
        remainder
    }

    fn insert_stack_anywhere(&mut self, stack: ItemStack, action: ActionType) -> ItemStack {
        let remainder = self.inner.insert_stack_anywhere(stack, action);
        self.sync_if(action);
        remainder
    }

    fn max_stack_size(&self, slot: usize) -> u32 {
        self.inner.max_stack_size(slot)
    }

    fn is_acceptable_stack(&self, slot: usize, stack: &ItemStack) -> bool {
        self.inner.is_acceptable_stack(slot, stack)
    }

    fn stacks(&self) -> Vec<ItemStack> {
        self.inner.stacks()
    }

    fn is_empty(&self) -> bool {
        InventoryComponent::is_empty(&self.inner)
    }

    fn amount_of(&self, item_id: ItemId) -> u32 {
        InventoryComponent::amount_of(&self.inner, item_id)
    }

    fn clear(&mut self) {
        self.inner.clear();
        self.sync.mark_dirty();
    }
}

impl<C: TankComponent, S: SyncHandle> TankComponent for Synced<C, S> {
    fn tanks(&self) -> usize {
        self.inner.tanks()
    }

    fn contents(&self, tank: usize) -> FluidVolume {
        self.inner.contents(tank)
    }

    fn max_capacity(&self, tank: usize) -> u64 {
        self.inner.max_capacity(tank)
    }

    fn can_insert(&self, tank: usize) -> bool {
        self.inner.can_insert(tank)
    }

    fn can_extract(&self, tank: usize) -> bool {
        self.inner.can_extract(tank)
    }

    fn take_fluid(&mut self, tank: usize, amount: u64, action: ActionType) -> FluidVolume {
        let taken = self.inner.take_fluid(tank, amount, action);
        self.sync_if(action);
        taken
    }

    fn remove_fluid(&mut self, tank: usize, action: ActionType) -> FluidVolume {
        let removed = self.inner.remove_fluid(tank, action);
        self.sync_if(action);
        removed
    }

    fn set_fluid(&mut self, tank: usize, fluid: FluidVolume) -> ComponentResult<()> {
        self.inner.set_fluid(tank, fluid)?;
        self.sync.mark_dirty();
        Ok(())
    }

    fn insert_fluid(&mut self, tank: usize, fluid: FluidVolume, action: ActionType) -> FluidVolume {
        let remainder = self.inner.insert_fluid(tank, fluid, action);
        self.sync_if(action);
        remainder
    }

    fn insert_fluid_anywhere(&mut self, fluid: FluidVolume, action: ActionType) -> FluidVolume {
        let remainder = self.inner.insert_fluid_anywhere(fluid, action);
        self.sync_if(action);
        remainder
    }

    fn is_acceptable_fluid(&self, tank: usize, fluid: &FluidVolume) -> bool {
        self.inner.is_acceptable_fluid(tank, fluid)
    }

    fn amount_of(&self, fluid: FluidId) -> u64 {
        TankComponent::amount_of(&self.inner, fluid)
    }

    fn is_empty(&self) -> bool {
        TankComponent::is_empty(&self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fluid::BUCKET;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<u32>>, impl Fn()) {
        let count = Rc::new(Cell::new(0));
        let handle = count.clone();
        (count, move || handle.set(handle.get() + 1))
    }

    #[test]
    fn test_tank_syncs_only_on_execute() {
        let (syncs, sync) = counter();
        let mut tank = SyncedTankComponent::with_tanks(1, 4 * BUCKET, sync);

        let water = FluidVolume::buckets(FluidId::WATER, 1);
        tank.insert_fluid(0, water, ActionType::Simulate);
        assert!(TankComponent::is_empty(&tank));
        assert_eq!(syncs.get(), 0);

        tank.insert_fluid(0, water, ActionType::Execute);
        assert_eq!(syncs.get(), 1);

        let preview = tank.take_fluid(0, 250, ActionType::Simulate);
        assert_eq!(preview.amount, 250);
        assert_eq!(tank.contents(0).amount, BUCKET);
        assert_eq!(syncs.get(), 1);

        tank.set_fluid(0, FluidVolume::empty()).unwrap();
        assert_eq!(syncs.get(), 2);
    }

    #[test]
    fn test_failed_set_does_not_sync() {
        let (syncs, sync) = counter();
        let mut inv = SyncedInventoryComponent::with_size(2, sync);
        assert!(inv.set_stack(9, ItemStack::empty()).is_err());
        assert_eq!(syncs.get(), 0);
    }
}
