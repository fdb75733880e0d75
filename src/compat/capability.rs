//! Capability framework bridge
//!
//! Block entities and items in the capability framework hand out
//! [`ItemHandler`] and [`FluidHandler`] objects, which describe simulation
//! with a `simulate: bool` flag instead of [`ActionType`]. [`CapabilityHook`]
//! serves them on both query paths and wraps them in adapters speaking the
//! component vocabulary.

use std::cell::RefCell;
use std::rc::Rc;

use crate::action::ActionType;
use crate::component::{InventoryComponent, TankComponent};
use crate::error::{ComponentError, ComponentResult};
use crate::fluid::FluidVolume;
use crate::helper::{BlockHook, Hook, ItemHook};
use crate::item::{ItemStack, SharedStack};
use crate::world::{BlockFace, VoxelPos, WorldView};

/// Which handler a caller is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    Items,
    Fluids,
}

impl CapabilityKind {
    pub fn name(self) -> &'static str {
        match self {
            CapabilityKind::Items => "items",
            CapabilityKind::Fluids => "fluids",
        }
    }
}

pub type SharedItemHandler = Rc<RefCell<dyn ItemHandler>>;
pub type SharedFluidHandler = Rc<RefCell<dyn FluidHandler>>;

/// A handler returned by a capability lookup
#[derive(Clone)]
pub enum Capability {
    Items(SharedItemHandler),
    Fluids(SharedFluidHandler),
}

impl Capability {
    pub fn kind(&self) -> CapabilityKind {
        match self {
            Capability::Items(_) => CapabilityKind::Items,
            Capability::Fluids(_) => CapabilityKind::Fluids,
        }
    }
}

/// Capability lookup on a block entity
pub trait CapabilityProvider {
    fn capability(&self, kind: CapabilityKind, side: Option<BlockFace>) -> Option<Capability>;
}

/// Slot storage in the capability framework
pub trait ItemHandler {
    fn slots(&self) -> usize;

    fn stack_in_slot(&self, slot: usize) -> ItemStack;

    fn set_stack_in_slot(&mut self, slot: usize, stack: ItemStack);

    /// Returns the part of `stack` that was not inserted
    fn insert_item(&mut self, slot: usize, stack: ItemStack, simulate: bool) -> ItemStack;

    fn extract_item(&mut self, slot: usize, amount: u32, simulate: bool) -> ItemStack;

    fn slot_limit(&self, slot: usize) -> u32;

    fn is_item_valid(&self, _slot: usize, _stack: &ItemStack) -> bool {
        true
    }
}

/// Fluid storage in the capability framework
///
/// Filling and draining address the handler as a whole, never a single tank.
pub trait FluidHandler {
    fn tanks(&self) -> usize;

    fn fluid_in_tank(&self, tank: usize) -> FluidVolume;

    fn set_fluid_in_tank(&mut self, tank: usize, fluid: FluidVolume);

    fn tank_capacity(&self, tank: usize) -> u64;

    fn is_fluid_valid(&self, _tank: usize, _fluid: &FluidVolume) -> bool {
        true
    }

    /// Returns the amount filled
    fn fill(&mut self, resource: FluidVolume, simulate: bool) -> u64;

    /// Drain up to `resource.amount` of `resource`'s fluid
    fn drain(&mut self, resource: FluidVolume, simulate: bool) -> FluidVolume;
}

/// [`InventoryComponent`] over an [`ItemHandler`]
pub struct ItemHandlerWrapper {
    handler: SharedItemHandler,
}

impl ItemHandlerWrapper {
    pub fn new(handler: SharedItemHandler) -> Self {
        Self { handler }
    }

    fn in_range(&self, slot: usize) -> bool {
        slot < self.handler.borrow().slots()
    }
}

impl InventoryComponent for ItemHandlerWrapper {
    fn size(&self) -> usize {
        self.handler.borrow().slots()
    }

    fn get_stack(&self, slot: usize) -> ItemStack {
        if !self.in_range(slot) {
            return ItemStack::empty();
        }
        self.handler.borrow().stack_in_slot(slot)
    }

    fn set_stack(&mut self, slot: usize, stack: ItemStack) -> ComponentResult<()> {
        let size = self.size();
        if slot >= size {
            return Err(ComponentError::InvalidSlot { slot, size });
        }
        self.handler.borrow_mut().set_stack_in_slot(slot, stack);
        Ok(())
    }

    fn can_insert(&self, slot: usize) -> bool {
        self.in_range(slot)
    }

    fn can_extract(&self, slot: usize) -> bool {
        self.in_range(slot)
    }

    fn take_stack(&mut self, slot: usize, amount: u32, action: ActionType) -> ItemStack {
        if !self.in_range(slot) || amount == 0 {
            return ItemStack::empty();
        }
        self.handler
            .borrow_mut()
            .extract_item(slot, amount, action.is_simulation())
    }

    fn remove_stack(&mut self, slot: usize, action: ActionType) -> ItemStack {
        let count = self.get_stack(slot).count();
        self.take_stack(slot, count, action)
    }

    fn insert_stack(&mut self, slot: usize, stack: ItemStack, action: ActionType) -> ItemStack {
        if stack.is_empty() || !self.in_range(slot) {
            return stack;
        }
        self.handler
            .borrow_mut()
            .insert_item(slot, stack, action.is_simulation())
    }

    fn max_stack_size(&self, slot: usize) -> u32 {
        self.handler.borrow().slot_limit(slot)
    }

    fn is_acceptable_stack(&self, slot: usize, stack: &ItemStack) -> bool {
        self.handler.borrow().is_item_valid(slot, stack)
    }
}

/// [`TankComponent`] over a [`FluidHandler`]
///
/// Per-tank takes drain by the fluid held in that tank, so a handler with
/// several tanks of the same fluid decides which one actually empties.
pub struct FluidHandlerWrapper {
    handler: SharedFluidHandler,
}

impl FluidHandlerWrapper {
    pub fn new(handler: SharedFluidHandler) -> Self {
        Self { handler }
    }

    fn in_range(&self, tank: usize) -> bool {
        tank < self.handler.borrow().tanks()
    }
}

impl TankComponent for FluidHandlerWrapper {
    fn tanks(&self) -> usize {
        self.handler.borrow().tanks()
    }

    fn contents(&self, tank: usize) -> FluidVolume {
        if !self.in_range(tank) {
            return FluidVolume::empty();
        }
        self.handler.borrow().fluid_in_tank(tank)
    }

    fn max_capacity(&self, tank: usize) -> u64 {
        if !self.in_range(tank) {
            return 0;
        }
        self.handler.borrow().tank_capacity(tank)
    }

    fn can_insert(&self, tank: usize) -> bool {
        self.in_range(tank)
    }

    fn can_extract(&self, tank: usize) -> bool {
        self.in_range(tank)
    }

    fn take_fluid(&mut self, tank: usize, amount: u64, action: ActionType) -> FluidVolume {
        let held = self.contents(tank);
        if held.is_empty() || amount == 0 {
            return FluidVolume::empty();
        }
        let request = held.with_amount(amount.min(held.amount));
        self.handler.borrow_mut().drain(request, action.is_simulation())
    }

    fn remove_fluid(&mut self, tank: usize, action: ActionType) -> FluidVolume {
        self.take_fluid(tank, u64::MAX, action)
    }

    fn set_fluid(&mut self, tank: usize, fluid: FluidVolume) -> ComponentResult<()> {
        let tanks = self.tanks();
        if tank >= tanks {
            return Err(ComponentError::InvalidTank { tank, tanks });
        }
        self.handler.borrow_mut().set_fluid_in_tank(tank, fluid);
        Ok(())
    }

    fn insert_fluid(&mut self, tank: usize, fluid: FluidVolume, action: ActionType) -> FluidVolume {
        if fluid.is_empty() || !self.in_range(tank) || !self.is_acceptable_fluid(tank, &fluid) {
            return fluid;
        }
        let filled = self.handler.borrow_mut().fill(fluid, action.is_simulation());
        fluid.with_amount(fluid.amount.saturating_sub(filled))
    }

    fn insert_fluid_anywhere(&mut self, fluid: FluidVolume, action: ActionType) -> FluidVolume {
        if fluid.is_empty() {
            return fluid;
        }
        let filled = self.handler.borrow_mut().fill(fluid, action.is_simulation());
        fluid.with_amount(fluid.amount.saturating_sub(filled))
    }

    fn is_acceptable_fluid(&self, tank: usize, fluid: &FluidVolume) -> bool {
        self.handler.borrow().is_fluid_valid(tank, fluid)
    }
}

/// Dual hook for the capability framework, serving inventories and tanks
pub struct CapabilityHook;

impl CapabilityHook {
    pub const ID: &'static str = "capabilities";

    fn block_capability(
        world: &dyn WorldView,
        pos: VoxelPos,
        dir: Option<BlockFace>,
        kind: CapabilityKind,
    ) -> Option<Capability> {
        let entity = world.block_entity(pos)?;
        let provider = entity.capabilities()?;
        provider.capability(kind, dir)
    }

    fn item_capability(
        stack: &SharedStack,
        kind: CapabilityKind,
    ) -> ComponentResult<Option<Capability>> {
        // The item may look at the stack itself, so release our borrow first
        let item = stack.try_borrow()?.item().cloned();
        Ok(item.and_then(|item| item.capability(stack, kind)))
    }

    fn item_name(stack: &SharedStack) -> String {
        match stack.try_borrow() {
            Ok(stack) => stack
                .item()
                .map_or_else(|| "empty stack".to_string(), |item| item.name().to_string()),
            Err(_) => "borrowed stack".to_string(),
        }
    }
}

fn mismatch(provider: String, requested: CapabilityKind, received: &Capability) -> ComponentError {
    ComponentError::CapabilityMismatch {
        provider,
        requested: requested.name(),
        received: received.kind().name(),
    }
}

fn into_inventory(
    capability: Option<Capability>,
    provider: impl FnOnce() -> String,
) -> ComponentResult<Option<Box<dyn InventoryComponent>>> {
    match capability {
        None => Ok(None),
        Some(Capability::Items(handler)) => Ok(Some(Box::new(ItemHandlerWrapper::new(handler)))),
        Some(other) => Err(mismatch(provider(), CapabilityKind::Items, &other)),
    }
}

fn into_tank(
    capability: Option<Capability>,
    provider: impl FnOnce() -> String,
) -> ComponentResult<Option<Box<dyn TankComponent>>> {
    match capability {
        None => Ok(None),
        Some(Capability::Fluids(handler)) => Ok(Some(Box::new(FluidHandlerWrapper::new(handler)))),
        Some(other) => Err(mismatch(provider(), CapabilityKind::Fluids, &other)),
    }
}

impl Hook for CapabilityHook {
    fn id(&self) -> &str {
        Self::ID
    }
}

impl BlockHook<dyn InventoryComponent> for CapabilityHook {
    fn has_component(&self, world: &dyn WorldView, pos: VoxelPos, dir: Option<BlockFace>) -> bool {
        Self::block_capability(world, pos, dir, CapabilityKind::Items).is_some()
    }

    fn get_component(
        &self,
        world: &dyn WorldView,
        pos: VoxelPos,
        dir: Option<BlockFace>,
    ) -> ComponentResult<Option<Box<dyn InventoryComponent>>> {
        let capability = Self::block_capability(world, pos, dir, CapabilityKind::Items);
        into_inventory(capability, || format!("block entity at {:?}", pos))
    }
}

impl ItemHook<dyn InventoryComponent> for CapabilityHook {
    fn has_component(&self, stack: &SharedStack) -> bool {
        matches!(Self::item_capability(stack, CapabilityKind::Items), Ok(Some(_)))
    }

    fn get_component(
        &self,
        stack: &SharedStack,
    ) -> ComponentResult<Option<Box<dyn InventoryComponent>>> {
        let capability = Self::item_capability(stack, CapabilityKind::Items)?;
        into_inventory(capability, || Self::item_name(stack))
    }
}

impl BlockHook<dyn TankComponent> for CapabilityHook {
    fn has_component(&self, world: &dyn WorldView, pos: VoxelPos, dir: Option<BlockFace>) -> bool {
        Self::block_capability(world, pos, dir, CapabilityKind::Fluids).is_some()
    }

    fn get_component(
        &self,
        world: &dyn WorldView,
        pos: VoxelPos,
        dir: Option<BlockFace>,
    ) -> ComponentResult<Option<Box<dyn TankComponent>>> {
        let capability = Self::block_capability(world, pos, dir, CapabilityKind::Fluids);
        into_tank(capability, || format!("block entity at {:?}", pos))
    }
}

impl ItemHook<dyn TankComponent> for CapabilityHook {
    fn has_component(&self, stack: &SharedStack) -> bool {
        matches!(Self::item_capability(stack, CapabilityKind::Fluids), Ok(Some(_)))
    }

    fn get_component(
        &self,
        stack: &SharedStack,
    ) -> ComponentResult<Option<Box<dyn TankComponent>>> {
        let capability = Self::item_capability(stack, CapabilityKind::Fluids)?;
        into_tank(capability, || Self::item_name(stack))
    }
}
