// Fallback component sync tests
//
// The synced fallback inventory and tank must treat simulated actions as pure
// reads: no slot change and no sync call. Executed actions sync exactly once.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use earth_components::{
    ActionType, FluidId, FluidVolume, InventoryComponent, Item, ItemId, ItemStack,
    SyncedInventoryComponent, SyncedTankComponent, TankComponent, BUCKET,
};

struct Coal;

impl Item for Coal {
    fn id(&self) -> ItemId {
        ItemId::COAL
    }

    fn name(&self) -> &str {
        "Coal"
    }
}

fn coal(count: u32) -> ItemStack {
    ItemStack::new(Arc::new(Coal), count)
}

/// Sync handle counting its calls
fn counter() -> (Rc<Cell<u32>>, impl Fn()) {
    let syncs = Rc::new(Cell::new(0));
    let handle = {
        let syncs = syncs.clone();
        move || syncs.set(syncs.get() + 1)
    };
    (syncs, handle)
}

#[test]
fn test_simulated_take_after_insert() {
    let (syncs, handle) = counter();
    let mut inv = SyncedInventoryComponent::with_size(4, handle);

    let rest = inv.insert_stack(0, coal(10), ActionType::Execute);
    assert!(rest.is_empty());
    assert_eq!(syncs.get(), 1);

    let before = inv.get_stack(0);
    let taken = inv.take_stack(0, 10, ActionType::Simulate);
    assert_eq!(taken.count(), 10);
    assert_eq!(taken.item_id(), Some(ItemId::COAL));
    assert_eq!(inv.get_stack(0), before);
    assert_eq!(syncs.get(), 1);
}

#[test]
fn test_every_simulated_mutation_is_silent() {
    let (syncs, handle) = counter();
    let mut inv = SyncedInventoryComponent::with_size(4, handle);
    inv.set_stack(1, coal(32)).unwrap();
    assert_eq!(syncs.get(), 1);
    let snapshot = inv.stacks();

    inv.insert_stack(0, coal(5), ActionType::Simulate);
    inv.insert_stack_anywhere(coal(50), ActionType::Simulate);
    inv.take_stack(1, 3, ActionType::Simulate);
    inv.remove_stack(1, ActionType::Simulate);

    assert_eq!(inv.stacks(), snapshot);
    assert_eq!(syncs.get(), 1);
}

#[test]
fn test_every_executed_mutation_syncs_once() {
    let (syncs, handle) = counter();
    let mut inv = SyncedInventoryComponent::with_size(4, handle);

    inv.insert_stack(0, coal(5), ActionType::Execute);
    assert_eq!(syncs.get(), 1);
    inv.insert_stack_anywhere(coal(70), ActionType::Execute);
    assert_eq!(syncs.get(), 2);
    assert_eq!(inv.get_stack(0).count(), 64);
    assert_eq!(inv.get_stack(1).count(), 11);

    inv.take_stack(1, 3, ActionType::Execute);
    assert_eq!(syncs.get(), 3);
    let removed = inv.remove_stack(0, ActionType::Execute);
    assert_eq!(removed.count(), 64);
    assert_eq!(syncs.get(), 4);

    inv.clear();
    assert!(inv.is_empty());
    assert_eq!(syncs.get(), 5);
}

#[test]
fn test_tank_follows_the_same_contract() {
    let (syncs, handle) = counter();
    let mut tank = SyncedTankComponent::with_tanks(2, 4 * BUCKET, handle);

    tank.insert_fluid(0, FluidVolume::buckets(FluidId::OIL, 3), ActionType::Simulate);
    assert!(TankComponent::is_empty(&tank));
    assert_eq!(syncs.get(), 0);

    tank.insert_fluid_anywhere(FluidVolume::buckets(FluidId::OIL, 6), ActionType::Execute);
    assert_eq!(tank.contents(0).amount, 4 * BUCKET);
    assert_eq!(tank.contents(1).amount, 2 * BUCKET);
    assert_eq!(syncs.get(), 1);

    let drained = tank.take_fluid(1, BUCKET, ActionType::Simulate);
    assert_eq!(drained, FluidVolume::buckets(FluidId::OIL, 1));
    assert_eq!(tank.contents(1).amount, 2 * BUCKET);
    assert_eq!(syncs.get(), 1);

    tank.remove_fluid(1, ActionType::Execute);
    assert!(tank.contents(1).is_empty());
    assert_eq!(syncs.get(), 2);
}
