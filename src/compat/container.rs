//! Engine-native slot containers
//!
//! Block entities like chests and furnaces store items in a [`Container`],
//! which knows nothing about simulation. [`ContainerWrapper`] exposes one as
//! an [`InventoryComponent`], computing simulated results on copies and
//! flagging the block entity changed after every committed mutation.

use std::cell::RefCell;
use std::rc::Rc;

use crate::action::ActionType;
use crate::component::simple_inventory::insertable_amount;
use crate::component::InventoryComponent;
use crate::error::{ComponentError, ComponentResult};
use crate::helper::{BlockHook, Hook};
use crate::item::{ItemStack, MAX_STACK_SIZE};
use crate::world::{BlockFace, VoxelPos, WorldView};

/// Slot storage owned by a block entity
pub trait Container {
    fn slot_count(&self) -> usize;

    /// Copy of the stack in `slot`
    fn stack_in(&self, slot: usize) -> ItemStack;

    /// Overwrite `slot`. Does not mark the container changed.
    fn put_stack(&mut self, slot: usize, stack: ItemStack);

    /// Per-slot limit for every slot in this container
    fn max_count_per_stack(&self) -> u32 {
        MAX_STACK_SIZE
    }

    /// Whether `stack` belongs in `slot` at all, e.g. fuel slots
    fn is_valid(&self, _slot: usize, _stack: &ItemStack) -> bool {
        true
    }

    /// Slots reachable from `face`; `None` means every slot
    fn accessible_slots(&self, _face: BlockFace) -> Option<Vec<usize>> {
        None
    }

    fn can_insert_from(&self, _slot: usize, _face: Option<BlockFace>) -> bool {
        true
    }

    fn can_extract_from(&self, _slot: usize, _face: Option<BlockFace>) -> bool {
        true
    }

    /// Tell the owning block entity its contents changed
    fn set_changed(&mut self);
}

/// Container shared between a block entity and the capability objects over it
pub type SharedContainer = Rc<RefCell<dyn Container>>;

/// Vec-backed container counting its change notifications
#[derive(Debug, Clone)]
pub struct BasicContainer {
    slots: Vec<ItemStack>,
    changes: u32,
}

impl BasicContainer {
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![ItemStack::empty(); size],
            changes: 0,
        }
    }

    /// Number of times `set_changed` was called
    pub fn changes(&self) -> u32 {
        self.changes
    }

    pub fn into_shared(self) -> SharedContainer {
        Rc::new(RefCell::new(self))
    }
}

impl Container for BasicContainer {
    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn stack_in(&self, slot: usize) -> ItemStack {
        self.slots.get(slot).cloned().unwrap_or_default()
    }

    fn put_stack(&mut self, slot: usize, stack: ItemStack) {
        if let Some(existing) = self.slots.get_mut(slot) {
            *existing = stack;
        }
    }

    fn set_changed(&mut self) {
        self.changes += 1;
    }
}

/// [`InventoryComponent`] view of a [`Container`], as seen from one face
///
/// Component slot `i` maps to the `i`th container slot reachable from the
/// face, so a furnace queried from below only exposes its output.
pub struct ContainerWrapper {
    container: SharedContainer,
    side: Option<BlockFace>,
    slots: Vec<usize>,
}

impl ContainerWrapper {
    pub fn new(container: SharedContainer, side: Option<BlockFace>) -> Self {
        let slots = {
            let inner = container.borrow();
            let count = inner.slot_count();
            match side.and_then(|face| inner.accessible_slots(face)) {
                Some(slots) => slots.into_iter().filter(|&slot| slot < count).collect(),
                None => (0..count).collect(),
            }
        };
        Self { container, side, slots }
    }

    fn real_slot(&self, slot: usize) -> Option<usize> {
        self.slots.get(slot).copied()
    }

    /// Replace the container slot and notify the owner
    fn commit(&self, real: usize, stack: ItemStack) {
        let mut container = self.container.borrow_mut();
        container.put_stack(real, stack);
        container.set_changed();
    }
}

impl InventoryComponent for ContainerWrapper {
    fn size(&self) -> usize {
        self.slots.len()
    }

    fn get_stack(&self, slot: usize) -> ItemStack {
        match self.real_slot(slot) {
            Some(real) => self.container.borrow().stack_in(real),
            None => ItemStack::empty(),
        }
    }

    fn set_stack(&mut self, slot: usize, stack: ItemStack) -> ComponentResult<()> {
        let real = self.real_slot(slot).ok_or(ComponentError::InvalidSlot {
            slot,
            size: self.slots.len(),
        })?;
        self.commit(real, stack);
        Ok(())
    }

    fn can_insert(&self, slot: usize) -> bool {
        match self.real_slot(slot) {
            Some(real) => self.container.borrow().can_insert_from(real, self.side),
            None => false,
        }
    }

    fn can_extract(&self, slot: usize) -> bool {
        match self.real_slot(slot) {
            Some(real) => self.container.borrow().can_extract_from(real, self.side),
            None => false,
        }
    }

    fn take_stack(&mut self, slot: usize, amount: u32, action: ActionType) -> ItemStack {
        let Some(real) = self.real_slot(slot) else {
            return ItemStack::empty();
        };
        if !self.can_extract(slot) {
            return ItemStack::empty();
        }

        let mut remaining = self.container.borrow().stack_in(real);
        if remaining.is_empty() || amount == 0 {
            return ItemStack::empty();
        }
        let taken = remaining.split(amount);
        if action.should_execute() {
            if remaining.is_empty() {
                remaining = ItemStack::empty();
            }
            self.commit(real, remaining);
        }
        taken
    }

    fn remove_stack(&mut self, slot: usize, action: ActionType) -> ItemStack {
        let count = self.get_stack(slot).count();
        self.take_stack(slot, count, action)
    }

    fn insert_stack(&mut self, slot: usize, stack: ItemStack, action: ActionType) -> ItemStack {
        let Some(real) = self.real_slot(slot) else {
            return stack;
        };
        if stack.is_empty() || !self.can_insert(slot) || !self.is_acceptable_stack(slot, &stack) {
            return stack;
        }

        let existing = self.container.borrow().stack_in(real);
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
            self.commit(real, merged);
        }
        stack.copy_with_count(stack.count() - to_move)
    }

    fn max_stack_size(&self, _slot: usize) -> u32 {
        self.container.borrow().max_count_per_stack()
    }

    fn is_acceptable_stack(&self, slot: usize, stack: &ItemStack) -> bool {
        match self.real_slot(slot) {
            Some(real) => self.container.borrow().is_valid(real, stack),
            None => false,
        }
    }

    fn clear(&mut self) {
        let mut container = self.container.borrow_mut();
        for &real in &self.slots {
            container.put_stack(real, ItemStack::empty());
        }
        container.set_changed();
    }
}

/// Hook exposing block entity containers, the last resort for inventories
pub struct ContainerHook;

impl ContainerHook {
    pub const ID: &'static str = "engine-container";
}

impl Hook for ContainerHook {
    fn id(&self) -> &str {
        Self::ID
    }
}

impl BlockHook<dyn InventoryComponent> for ContainerHook {
    fn has_component(&self, world: &dyn WorldView, pos: VoxelPos, _dir: Option<BlockFace>) -> bool {
        world
            .block_entity(pos)
            .map_or(false, |entity| entity.container().is_some())
    }

    fn get_component(
        &self,
        world: &dyn WorldView,
        pos: VoxelPos,
        dir: Option<BlockFace>,
    ) -> ComponentResult<Option<Box<dyn InventoryComponent>>> {
        let Some(container) = world.block_entity(pos).and_then(|entity| entity.container()) else {
            return Ok(None);
        };
        Ok(Some(Box::new(ContainerWrapper::new(container, dir))))
    }
}
