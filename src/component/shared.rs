use std::cell::RefCell;
use std::rc::Rc;

use super::{InventoryComponent, TankComponent};
use crate::action::ActionType;
use crate::error::ComponentResult;
use crate::fluid::{FluidId, FluidVolume};
use crate::item::{ItemId, ItemStack};

/// Inventory owned by the world and handed out to many queries
pub type SharedInventory = Rc<RefCell<dyn InventoryComponent>>;

/// Tank owned by the world and handed out to many queries
pub type SharedTank = Rc<RefCell<dyn TankComponent>>;

/// Capability object over a component that lives elsewhere
///
/// Hooks that find a component already stored on a block or entity return a
/// fresh `ComponentRef` pointing at it. Each call borrows the component for
/// the duration of that call only; overlapping mutable use from inside the
/// component itself panics like any other `RefCell` misuse.
pub struct ComponentRef<T: ?Sized> {
    inner: Rc<RefCell<T>>,
}

impl<T: ?Sized> ComponentRef<T> {
    pub fn new(inner: Rc<RefCell<T>>) -> Self {
        Self { inner }
    }

    /// Whether this reference points at `other`
    pub fn points_to(&self, other: &Rc<RefCell<T>>) -> bool {
        Rc::ptr_eq(&self.inner, other)
    }
}

impl<T: InventoryComponent + ?Sized> InventoryComponent for ComponentRef<T> {
    fn size(&self) -> usize {
        self.inner.borrow().size()
    }

    fn get_stack(&self, slot: usize) -> ItemStack {
        self.inner.borrow().get_stack(slot)
    }

    fn set_stack(&mut self, slot: usize, stack: ItemStack) -> ComponentResult<()> {
        self.inner.borrow_mut().set_stack(slot, stack)
    }

    fn can_insert(&self, slot: usize) -> bool {
        self.inner.borrow().can_insert(slot)
    }

    fn can_extract(&self, slot: usize) -> bool {
        self.inner.borrow().can_extract(slot)
    }

    fn take_stack(&mut self, slot: usize, amount: u32, action: ActionType) -> ItemStack {
        self.inner.borrow_mut().take_stack(slot, amount, action)
    }

    fn remove_stack(&mut self, slot: usize, action: ActionType) -> ItemStack {
        self.inner.borrow_mut().remove_stack(slot, action)
    }

    fn insert_stack(&mut self, slot: usize, stack: ItemStack, action: ActionType) -> ItemStack {
        self.inner.borrow_mut().insert_stack(slot, stack, action)
    }

    fn insert_stack_anywhere(&mut self, stack: ItemStack, action: ActionType) -> ItemStack {
        self.inner.borrow_mut().insert_stack_anywhere(stack, action)
    }

    fn max_stack_size(&self, slot: usize) -> u32 {
        self.inner.borrow().max_stack_size(slot)
    }

    fn is_acceptable_stack(&self, slot: usize, stack: &ItemStack) -> bool {
        self.inner.borrow().is_acceptable_stack(slot, stack)
    }

    fn stacks(&self) -> Vec<ItemStack> {
        self.inner.borrow().stacks()
    }

    fn is_empty(&self) -> bool {
        InventoryComponent::is_empty(&*self.inner.borrow())
    }

    fn amount_of(&self, item_id: ItemId) -> u32 {
        InventoryComponent::amount_of(&*self.inner.borrow(), item_id)
    }

    fn clear(&mut self) {
        self.inner.borrow_mut().clear()
    }
}

impl<T: TankComponent + ?Sized> TankComponent for ComponentRef<T> {
    fn tanks(&self) -> usize {
        self.inner.borrow().tanks()
    }

    fn contents(&self, tank: usize) -> FluidVolume {
        self.inner.borrow().contents(tank)
    }

    fn max_capacity(&self, tank: usize) -> u64 {
        self.inner.borrow().max_capacity(tank)
    }

    fn can_insert(&self, tank: usize) -> bool {
        self.inner.borrow().can_insert(tank)
    }

    fn can_extract(&self, tank: usize) -> bool {
        self.inner.borrow().can_extract(tank)
    }

    fn take_fluid(&mut self, tank: usize, amount: u64, action: ActionType) -> FluidVolume {
        self.inner.borrow_mut().take_fluid(tank, amount, action)
    }

    fn remove_fluid(&mut self, tank: usize, action: ActionType) -> FluidVolume {
        self.inner.borrow_mut().remove_fluid(tank, action)
    }

    fn set_fluid(&mut self, tank: usize, fluid: FluidVolume) -> ComponentResult<()> {
        self.inner.borrow_mut().set_fluid(tank, fluid)
    }

    fn insert_fluid(&mut self, tank: usize, fluid: FluidVolume, action: ActionType) -> FluidVolume {
        self.inner.borrow_mut().insert_fluid(tank, fluid, action)
    }

    fn insert_fluid_anywhere(&mut self, fluid: FluidVolume, action: ActionType) -> FluidVolume {
        self.inner.borrow_mut().insert_fluid_anywhere(fluid, action)
    }

    fn is_acceptable_fluid(&self, tank: usize, fluid: &FluidVolume) -> bool {
        self.inner.borrow().is_acceptable_fluid(tank, fluid)
    }

    fn amount_of(&self, fluid: FluidId) -> u64 {
        TankComponent::amount_of(&*self.inner.borrow(), fluid)
    }

    fn is_empty(&self) -> bool {
        TankComponent::is_empty(&*self.inner.borrow())
    }
}
