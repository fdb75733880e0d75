use crate::action::ActionType;
use crate::error::ComponentResult;
use crate::item::{ItemId, ItemStack, MAX_STACK_SIZE};

/// Slot-based item storage exposed by a block, entity or item stack
///
/// Every mutating operation that takes an [`ActionType`] must leave the
/// component untouched under `Simulate` and return exactly what `Execute`
/// would have returned.
pub trait InventoryComponent {
    /// Number of slots
    fn size(&self) -> usize;

    /// Copy of the stack in `slot`; empty when the slot is empty or out of range
    fn get_stack(&self, slot: usize) -> ItemStack;

    /// Replace the contents of `slot` unconditionally
    fn set_stack(&mut self, slot: usize, stack: ItemStack) -> ComponentResult<()>;

    /// Whether items may be inserted into `slot` at all
    fn can_insert(&self, slot: usize) -> bool;

    /// Whether items may be taken out of `slot` at all
    fn can_extract(&self, slot: usize) -> bool;

    /// Take up to `amount` items out of `slot`, returning what was taken
    fn take_stack(&mut self, slot: usize, amount: u32, action: ActionType) -> ItemStack;

    /// Take the whole stack out of `slot`
    fn remove_stack(&mut self, slot: usize, action: ActionType) -> ItemStack;

    /// Insert into `slot`, returning whatever did not fit
    fn insert_stack(&mut self, slot: usize, stack: ItemStack, action: ActionType) -> ItemStack;

    /// Insert wherever the stack fits, returning whatever did not fit
    ///
    /// Matching stacks are topped up first, then empty slots are filled in
    /// slot order.
    fn insert_stack_anywhere(&mut self, stack: ItemStack, action: ActionType) -> ItemStack {
        let mut remaining = stack;

        // Phase 1: merge into existing stacks
        for slot in 0..self.size() {
            if remaining.is_empty() {
                return remaining;
            }
            if self.get_stack(slot).can_stack_with(&remaining) {
                remaining = self.insert_stack(slot, remaining, action);
            }
        }

        // Phase 2: start new stacks in empty slots
        for slot in 0..self.size() {
            if remaining.is_empty() {
                break;
            }
            if self.get_stack(slot).is_empty() {
                remaining = self.insert_stack(slot, remaining, action);
            }
        }

        remaining
    }

    /// Slot limit, before the item's own stack limit is applied
    fn max_stack_size(&self, _slot: usize) -> u32 {
        MAX_STACK_SIZE
    }

    /// Whether `stack` is allowed in `slot`
    fn is_acceptable_stack(&self, _slot: usize, _stack: &ItemStack) -> bool {
        true
    }

    /// Copies of every slot, in slot order
    fn stacks(&self) -> Vec<ItemStack> {
        (0..self.size()).map(|slot| self.get_stack(slot)).collect()
    }

    fn is_empty(&self) -> bool {
        (0..self.size()).all(|slot| self.get_stack(slot).is_empty())
    }

    /// Count total items of a specific type
    fn amount_of(&self, item_id: ItemId) -> u32 {
        (0..self.size())
            .map(|slot| self.get_stack(slot))
            .filter(|stack| stack.item_id() == Some(item_id))
            .map(|stack| stack.count())
            .sum()
    }

    /// Empty every slot
    fn clear(&mut self) {
        for slot in 0..self.size() {
            let _ = self.set_stack(slot, ItemStack::empty());
        }
    }
}
