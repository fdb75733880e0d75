//! Items that carry their own slots
//!
//! Bags and backpacks implement [`ItemInventory`] on the item type and keep
//! their contents in the stack they are called with. [`ItemInventoryHook`]
//! hands out a [`WrappedItemInventory`] bound to the exact stack handle it was
//! asked about, so writes land on that stack and nowhere else.

use std::sync::Arc;

use crate::action::ActionType;
use crate::component::simple_inventory::insertable_amount;
use crate::component::InventoryComponent;
use crate::error::{ComponentError, ComponentResult};
use crate::helper::{Hook, ItemHook};
use crate::item::{Item, ItemStack, SharedStack, MAX_STACK_SIZE};

/// Slot storage kept inside an item stack
///
/// Every method receives the stack holding the inventory as `inv`.
pub trait ItemInventory: Send + Sync {
    fn inv_size(&self, inv: &ItemStack) -> usize;

    fn stack_in(&self, inv: &ItemStack, slot: usize) -> ItemStack;

    fn set_stack_in(&self, inv: &mut ItemStack, slot: usize, stack: ItemStack);

    fn can_insert(&self, _inv: &ItemStack, _slot: usize, _stack: &ItemStack) -> bool {
        true
    }

    fn can_take(&self, _inv: &ItemStack, _slot: usize) -> bool {
        true
    }

    fn max_count(&self, _inv: &ItemStack, _slot: usize) -> u32 {
        MAX_STACK_SIZE
    }
}

/// [`InventoryComponent`] over an [`ItemInventory`] and the stack holding it
///
/// `set_stack` reports a stack already borrowed elsewhere as
/// [`ComponentError::StackBorrowed`]. The other methods borrow the stack for
/// the duration of the call and panic on overlapping use, as
/// [`ComponentRef`](crate::component::ComponentRef) does.
pub struct WrappedItemInventory {
    stack: SharedStack,
    item: Arc<dyn Item>,
}

impl WrappedItemInventory {
    pub fn new(stack: SharedStack, item: Arc<dyn Item>) -> Self {
        Self { stack, item }
    }

    /// The stack this inventory reads and writes
    pub fn stack(&self) -> &SharedStack {
        &self.stack
    }

    fn inventory(&self) -> Option<&dyn ItemInventory> {
        self.item.as_item_inventory()
    }

    fn in_range(&self, slot: usize) -> bool {
        slot < self.size()
    }

    /// Commit a mutation that already passed its checks
    fn commit(&self, slot: usize, stack: ItemStack) {
        if let Some(inventory) = self.inventory() {
            inventory.set_stack_in(&mut self.stack.borrow_mut(), slot, stack);
        }
    }
}

impl InventoryComponent for WrappedItemInventory {
    fn size(&self) -> usize {
        self.inventory()
            .map_or(0, |inventory| inventory.inv_size(&self.stack.borrow()))
    }

    fn get_stack(&self, slot: usize) -> ItemStack {
        if !self.in_range(slot) {
            return ItemStack::empty();
        }
        self.inventory().map_or_else(ItemStack::empty, |inventory| {
            inventory.stack_in(&self.stack.borrow(), slot)
        })
    }

    fn set_stack(&mut self, slot: usize, stack: ItemStack) -> ComponentResult<()> {
        let Some(inventory) = self.inventory() else {
            return Err(ComponentError::InvalidSlot { slot, size: 0 });
        };
        let mut holder = self.stack.try_borrow_mut()?;
        let size = inventory.inv_size(&holder);
        if slot >= size {
            return Err(ComponentError::InvalidSlot { slot, size });
        }
        inventory.set_stack_in(&mut holder, slot, stack);
        Ok(())
    }

    fn can_insert(&self, slot: usize) -> bool {
        self.in_range(slot)
    }

    fn can_extract(&self, slot: usize) -> bool {
        if !self.in_range(slot) {
            return false;
        }
        self.inventory()
            .map_or(false, |inventory| inventory.can_take(&self.stack.borrow(), slot))
    }

    fn take_stack(&mut self, slot: usize, amount: u32, action: ActionType) -> ItemStack {
        if !self.can_extract(slot) {
            return ItemStack::empty();
        }
        let mut remaining = self.get_stack(slot);
        if remaining.is_empty() {
            return ItemStack::empty();
        }
        let taken = remaining.split(amount);
        if action.should_execute() {
            if remaining.is_empty() {
                remaining = ItemStack::empty();
            }
            self.commit(slot, remaining);
        }
        taken
    }

    fn remove_stack(&mut self, slot: usize, action: ActionType) -> ItemStack {
        let count = self.get_stack(slot).count();
        self.take_stack(slot, count, action)
    }

    fn insert_stack(&mut self, slot: usize, stack: ItemStack, action: ActionType) -> ItemStack {
        if stack.is_empty() || !self.can_insert(slot) || !self.is_acceptable_stack(slot, &stack) {
            return stack;
        }

        let existing = self.get_stack(slot);
        let to_move = insertable_amount(&existing, &stack, self.max_stack_size(slot));
        if to_move == 0 {
            return stack;
        }

        if action.should_execute() {
            let merged = if existing.is_empty() {
                stack.copy_with_count(to_move)
            } else {
                existing.copy_with_count(existing.count() + to_move)
            };
            self.commit(slot, merged);
        }
        stack.copy_with_count(stack.count() - to_move)
    }

    fn max_stack_size(&self, slot: usize) -> u32 {
        self.inventory()
            .map_or(MAX_STACK_SIZE, |inventory| inventory.max_count(&self.stack.borrow(), slot))
    }

    fn is_acceptable_stack(&self, slot: usize, stack: &ItemStack) -> bool {
        self.inventory()
            .map_or(false, |inventory| inventory.can_insert(&self.stack.borrow(), slot, stack))
    }
}

/// Hook exposing item inventories on stacks
pub struct ItemInventoryHook;

impl ItemInventoryHook {
    pub const ID: &'static str = "item-inventory";
}

impl Hook for ItemInventoryHook {
    fn id(&self) -> &str {
        Self::ID
    }
}

impl ItemHook<dyn InventoryComponent> for ItemInventoryHook {
    fn has_component(&self, stack: &SharedStack) -> bool {
        match stack.try_borrow() {
            Ok(stack) => stack.item().map_or(false, |item| item.as_item_inventory().is_some()),
            Err(_) => false,
        }
    }

    fn get_component(
        &self,
        stack: &SharedStack,
    ) -> ComponentResult<Option<Box<dyn InventoryComponent>>> {
        let item = match stack.try_borrow()?.item() {
            Some(item) if item.as_item_inventory().is_some() => item.clone(),
            _ => return Ok(None),
        };
        Ok(Some(Box::new(WrappedItemInventory::new(stack.clone(), item))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemId;
    use serde_json::{json, Value};

    struct Coal;

    impl Item for Coal {
        fn id(&self) -> ItemId {
            ItemId::COAL
        }

        fn name(&self) -> &str {
            "Coal"
        }
    }

    /// Four-slot coal pouch keeping slot counts in the stack tag
    struct CoalPouch;

    impl CoalPouch {
        fn counts(inv: &ItemStack) -> Vec<u64> {
            match inv.tag().get("coal") {
                Some(Value::Array(counts)) => {
                    counts.iter().map(|c| c.as_u64().unwrap_or(0)).collect()
                }
                _ => vec![0; 4],
            }
        }
    }

    impl ItemInventory for CoalPouch {
        fn inv_size(&self, _inv: &ItemStack) -> usize {
            4
        }

        fn stack_in(&self, inv: &ItemStack, slot: usize) -> ItemStack {
            let count = Self::counts(inv).get(slot).copied().unwrap_or(0);
            ItemStack::new(Arc::new(Coal), count as u32)
        }

        fn set_stack_in(&self, inv: &mut ItemStack, slot: usize, stack: ItemStack) {
            let mut counts = Self::counts(inv);
            if let Some(count) = counts.get_mut(slot) {
                *count = stack.count() as u64;
            }
            inv.tag_mut().insert("coal".to_string(), json!(counts));
        }

        fn can_insert(&self, _inv: &ItemStack, _slot: usize, stack: &ItemStack) -> bool {
            stack.item_id() == Some(ItemId::COAL)
        }
    }

    impl Item for CoalPouch {
        fn id(&self) -> ItemId {
            ItemId::BACKPACK
        }

        fn name(&self) -> &str {
            "Coal Pouch"
        }

        fn max_stack_size(&self) -> u32 {
            1
        }

        fn as_item_inventory(&self) -> Option<&dyn ItemInventory> {
            Some(self)
        }
    }

    #[test]
    fn test_hook_claims_only_item_inventories() {
        let pouch = ItemStack::single(Arc::new(CoalPouch)).into_shared();
        let coal = ItemStack::new(Arc::new(Coal), 3).into_shared();

        assert!(ItemInventoryHook.has_component(&pouch));
        assert!(!ItemInventoryHook.has_component(&coal));
        assert!(ItemInventoryHook.get_component(&coal).unwrap().is_none());
        assert_eq!(ItemInventoryHook.get_component(&pouch).unwrap().map(|inv| inv.size()), Some(4));
    }

    #[test]
    fn test_writes_land_on_the_wrapped_stack() {
        let pouch = ItemStack::single(Arc::new(CoalPouch)).into_shared();
        let twin = ItemStack::single(Arc::new(CoalPouch)).into_shared();
        let mut inv = ItemInventoryHook.get_component(&pouch).unwrap().unwrap();

        let rest = inv.insert_stack(2, ItemStack::new(Arc::new(Coal), 10), ActionType::Execute);
        assert!(rest.is_empty());
        assert_eq!(CoalPouch.stack_in(&pouch.borrow(), 2).count(), 10);
        assert_eq!(CoalPouch.stack_in(&twin.borrow(), 2).count(), 0);

        let taken = inv.take_stack(2, 4, ActionType::Simulate);
        assert_eq!(taken.count(), 4);
        assert_eq!(inv.get_stack(2).count(), 10);
    }

    #[test]
    fn test_rejects_foreign_items() {
        let pouch = ItemStack::single(Arc::new(CoalPouch)).into_shared();
        let mut inv = WrappedItemInventory::new(pouch.clone(), Arc::new(CoalPouch));
        let other = ItemStack::new(Arc::new(CoalPouch), 1);
        assert_eq!(inv.insert_stack(0, other.clone(), ActionType::Execute), other);
        assert!(InventoryComponent::is_empty(&inv));
    }

    #[test]
    fn test_borrowed_stack_surfaces_as_error() {
        let pouch = ItemStack::single(Arc::new(CoalPouch)).into_shared();
        let mut inv = WrappedItemInventory::new(pouch.clone(), Arc::new(CoalPouch));

        let _guard = pouch.borrow_mut();
        assert!(matches!(
            inv.set_stack(0, ItemStack::new(Arc::new(Coal), 1)),
            Err(ComponentError::StackBorrowed)
        ));
        let resolved = ItemInventoryHook.get_component(&pouch);
        assert!(matches!(resolved, Err(ComponentError::StackBorrowed)));
    }

    #[test]
    #[should_panic]
    fn test_insert_into_borrowed_stack_is_not_swallowed() {
        let pouch = ItemStack::single(Arc::new(CoalPouch)).into_shared();
        let mut inv = WrappedItemInventory::new(pouch.clone(), Arc::new(CoalPouch));

        let _guard = pouch.borrow_mut();
        inv.insert_stack(0, ItemStack::new(Arc::new(Coal), 5), ActionType::Execute);
    }
}
