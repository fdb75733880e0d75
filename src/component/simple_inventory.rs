use super::InventoryComponent;
use crate::action::ActionType;
use crate::error::{ComponentError, ComponentResult};
use crate::item::{ItemStack, MAX_STACK_SIZE};

/// How many items of `incoming` fit on top of `existing` under `limit`
///
/// Zero when the two stacks cannot share a slot.
pub(crate) fn insertable_amount(existing: &ItemStack, incoming: &ItemStack, limit: u32) -> u32 {
    if incoming.is_empty() {
        return 0;
    }
    let limit = limit.min(incoming.max_stack_size());
    if existing.is_empty() {
        incoming.count().min(limit)
    } else if existing.can_stack_with(incoming) {
        limit.saturating_sub(existing.count()).min(incoming.count())
    } else {
        0
    }
}

/// Fixed-size slot array with no side effects
///
/// This is the plain storage the synced fallback component builds on, and a
/// convenient component for block entities that need nothing fancier.
#[derive(Debug, Clone)]
pub struct SimpleInventoryComponent {
    stacks: Vec<ItemStack>,
    max_stack_size: u32,
}

impl SimpleInventoryComponent {
    /// Creates a new empty inventory with the specified number of slots
    pub fn new(size: usize) -> Self {
        Self {
            stacks: vec![ItemStack::empty(); size],
            max_stack_size: MAX_STACK_SIZE,
        }
    }

    /// Lower the per-slot limit below the default of 64
    pub fn with_max_stack_size(mut self, max_stack_size: u32) -> Self {
        self.max_stack_size = max_stack_size;
        self
    }

    fn check_slot(&self, slot: usize) -> ComponentResult<()> {
        if slot < self.stacks.len() {
            Ok(())
        } else {
            Err(ComponentError::InvalidSlot {
                slot,
                size: self.stacks.len(),
            })
        }
    }
}

impl InventoryComponent for SimpleInventoryComponent {
    fn size(&self) -> usize {
        self.stacks.len()
    }

    fn get_stack(&self, slot: usize) -> ItemStack {
        self.stacks.get(slot).cloned().unwrap_or_default()
    }

    fn set_stack(&mut self, slot: usize, stack: ItemStack) -> ComponentResult<()> {
        self.check_slot(slot)?;
        self.stacks[slot] = stack;
        Ok(())
    }

    fn can_insert(&self, slot: usize) -> bool {
        slot < self.stacks.len()
    }

    fn can_extract(&self, slot: usize) -> bool {
        slot < self.stacks.len()
    }

    fn take_stack(&mut self, slot: usize, amount: u32, action: ActionType) -> ItemStack {
        if !self.can_extract(slot) {
            return ItemStack::empty();
        }
        let stack = &mut self.stacks[slot];
        if action.should_execute() {
            let taken = stack.split(amount);
            if stack.is_empty() {
                *stack = ItemStack::empty();
            }
            taken
        } else {
            stack.copy_with_count(amount.min(stack.count()))
        }
    }

    fn remove_stack(&mut self, slot: usize, action: ActionType) -> ItemStack {
        if !self.can_extract(slot) {
            return ItemStack::empty();
        }
        if action.should_execute() {
            std::mem::take(&mut self.stacks[slot])
        } else {
            self.stacks[slot].clone()
        }
    }

    fn insert_stack(&mut self, slot: usize, stack: ItemStack, action: ActionType) -> ItemStack {
        if stack.is_empty() || !self.can_insert(slot) || !self.is_acceptable_stack(slot, &stack) {
            return stack;
        }

        let limit = self.max_stack_size(slot);
        let existing = &mut self.stacks[slot];
        let to_move = insertable_amount(existing, &stack, limit);
        if to_move == 0 {
            return stack;
        }

        if action.should_execute() {
            if existing.is_empty() {
                *existing = stack.copy_with_count(to_move);
            } else {
                existing.grow(to_move);
            }
        }
        stack.copy_with_count(stack.count() - to_move)
    }

    fn max_stack_size(&self, _slot: usize) -> u32 {
        self.max_stack_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Item, ItemId};
    use std::sync::Arc;

    struct TestItem(ItemId, u32);

    impl Item for TestItem {
        fn id(&self) -> ItemId {
            self.0
        }

        fn name(&self) -> &str {
            "test"
        }

        fn max_stack_size(&self) -> u32 {
            self.1
        }
    }

    fn coal(count: u32) -> ItemStack {
        ItemStack::new(Arc::new(TestItem(ItemId::COAL, 64)), count)
    }

    #[test]
    fn test_insert_respects_slot_and_item_limits() {
        let mut inv = SimpleInventoryComponent::new(2).with_max_stack_size(16);
        let rest = inv.insert_stack(0, coal(20), ActionType::Execute);
        assert_eq!(inv.get_stack(0).count(), 16);
        assert_eq!(rest.count(), 4);

        let tool = ItemStack::new(Arc::new(TestItem(ItemId(2000), 1)), 3);
        let rest = inv.insert_stack(1, tool, ActionType::Execute);
        assert_eq!(inv.get_stack(1).count(), 1);
        assert_eq!(rest.count(), 2);
    }

    #[test]
    fn test_insert_refuses_mismatched_item() {
        let mut inv = SimpleInventoryComponent::new(1);
        inv.set_stack(0, coal(5)).unwrap();
        let diamond = ItemStack::new(Arc::new(TestItem(ItemId::DIAMOND, 64)), 2);
        let rest = inv.insert_stack(0, diamond.clone(), ActionType::Execute);
        assert_eq!(rest, diamond);
        assert_eq!(inv.get_stack(0), coal(5));
    }

    #[test]
    fn test_simulated_take_leaves_slot() {
        let mut inv = SimpleInventoryComponent::new(1);
        inv.set_stack(0, coal(10)).unwrap();

        let preview = inv.take_stack(0, 4, ActionType::Simulate);
        assert_eq!(preview.count(), 4);
        assert_eq!(inv.get_stack(0).count(), 10);

        let taken = inv.take_stack(0, 40, ActionType::Execute);
        assert_eq!(taken.count(), 10);
        assert!(inv.get_stack(0).is_empty());
    }

    #[test]
    fn test_insert_anywhere_merges_before_filling_empty_slots() {
        let mut inv = SimpleInventoryComponent::new(3);
        inv.set_stack(2, coal(60)).unwrap();

        let rest = inv.insert_stack_anywhere(coal(10), ActionType::Execute);
        assert!(rest.is_empty());
        assert_eq!(inv.get_stack(2).count(), 64);
        assert_eq!(inv.get_stack(0).count(), 6);
        assert!(inv.get_stack(1).is_empty());
        assert_eq!(inv.amount_of(ItemId::COAL), 70);
    }

    #[test]
    fn test_simulated_insert_anywhere_reports_overflow() {
        let mut inv = SimpleInventoryComponent::new(2);
        let before = inv.stacks();
        let rest = inv.insert_stack_anywhere(coal(150), ActionType::Simulate);
        assert_eq!(rest.count(), 22);
        assert_eq!(inv.stacks(), before);
    }

    #[test]
    fn test_set_stack_out_of_range() {
        let mut inv = SimpleInventoryComponent::new(1);
        let err = inv.set_stack(3, coal(1)).unwrap_err();
        assert!(matches!(err, ComponentError::InvalidSlot { slot: 3, size: 1 }));
        assert!(inv.take_stack(3, 1, ActionType::Execute).is_empty());
    }
}
