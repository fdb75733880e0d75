//! Hooks for the component framework itself
//!
//! Components attached through the framework already speak the component
//! vocabulary, so these hooks only locate them and hand back a
//! [`ComponentRef`] to the stored instance.

use crate::component::{
    ComponentProvider, ComponentRef, InventoryComponent, SharedInventory, SharedTank, TankComponent,
};
use crate::error::ComponentResult;
use crate::helper::{BlockHook, Hook, ItemHook};
use crate::item::SharedStack;
use crate::world::{BlockFace, VoxelPos, WorldView};

/// Components attached to blocks. First priority for blocks.
pub struct BlockComponentHook;

impl BlockComponentHook {
    pub const ID: &'static str = "block-components";
}

/// Components attached to entities standing in a block. Second priority for blocks.
pub struct EntityComponentHook;

impl EntityComponentHook {
    pub const ID: &'static str = "entity-components";

    /// First live entity at `pos` whose components yield `found`
    fn find<T>(
        world: &dyn WorldView,
        pos: VoxelPos,
        found: impl Fn(&dyn ComponentProvider) -> Option<T>,
    ) -> Option<T> {
        world
            .entities_at(pos)
            .iter()
            .filter(|entity| entity.is_alive())
            .find_map(|entity| entity.components().and_then(|components| found(components)))
    }
}

/// Components attached to item stacks. First priority for items.
pub struct ItemComponentHook;

impl ItemComponentHook {
    pub const ID: &'static str = "item-components";

    fn inventory(stack: &SharedStack) -> ComponentResult<Option<SharedInventory>> {
        let item = stack.try_borrow()?.item().cloned();
        Ok(item.and_then(|item| {
            item.component_provider()
                .and_then(|provider| provider.inventory_component(stack))
        }))
    }

    fn tank(stack: &SharedStack) -> ComponentResult<Option<SharedTank>> {
        let item = stack.try_borrow()?.item().cloned();
        Ok(item.and_then(|item| {
            item.component_provider()
                .and_then(|provider| provider.tank_component(stack))
        }))
    }
}

fn boxed_inventory(inv: SharedInventory) -> Box<dyn InventoryComponent> {
    Box::new(ComponentRef::new(inv))
}

fn boxed_tank(tank: SharedTank) -> Box<dyn TankComponent> {
    Box::new(ComponentRef::new(tank))
}

fn block_inventory(
    world: &dyn WorldView,
    pos: VoxelPos,
    dir: Option<BlockFace>,
) -> Option<SharedInventory> {
    world.block_components(pos)?.inventory_component(dir)
}

fn block_tank(world: &dyn WorldView, pos: VoxelPos, dir: Option<BlockFace>) -> Option<SharedTank> {
    world.block_components(pos)?.tank_component(dir)
}

impl Hook for BlockComponentHook {
    fn id(&self) -> &str {
        Self::ID
    }
}

impl BlockHook<dyn InventoryComponent> for BlockComponentHook {
    fn has_component(&self, world: &dyn WorldView, pos: VoxelPos, dir: Option<BlockFace>) -> bool {
        block_inventory(world, pos, dir).is_some()
    }

    fn get_component(
        &self,
        world: &dyn WorldView,
        pos: VoxelPos,
        dir: Option<BlockFace>,
    ) -> ComponentResult<Option<Box<dyn InventoryComponent>>> {
        Ok(block_inventory(world, pos, dir).map(boxed_inventory))
    }
}

impl BlockHook<dyn TankComponent> for BlockComponentHook {
    fn has_component(&self, world: &dyn WorldView, pos: VoxelPos, dir: Option<BlockFace>) -> bool {
        block_tank(world, pos, dir).is_some()
    }

    fn get_component(
        &self,
        world: &dyn WorldView,
        pos: VoxelPos,
        dir: Option<BlockFace>,
    ) -> ComponentResult<Option<Box<dyn TankComponent>>> {
        Ok(block_tank(world, pos, dir).map(boxed_tank))
    }
}

impl Hook for EntityComponentHook {
    fn id(&self) -> &str {
        Self::ID
    }
}

impl BlockHook<dyn InventoryComponent> for EntityComponentHook {
    fn has_component(&self, world: &dyn WorldView, pos: VoxelPos, dir: Option<BlockFace>) -> bool {
        Self::find(world, pos, |components| components.inventory_component(dir)).is_some()
    }

    fn get_component(
        &self,
        world: &dyn WorldView,
        pos: VoxelPos,
        dir: Option<BlockFace>,
    ) -> ComponentResult<Option<Box<dyn InventoryComponent>>> {
        let found = Self::find(world, pos, |components| components.inventory_component(dir));
        Ok(found.map(boxed_inventory))
    }
}

impl BlockHook<dyn TankComponent> for EntityComponentHook {
    fn has_component(&self, world: &dyn WorldView, pos: VoxelPos, dir: Option<BlockFace>) -> bool {
        Self::find(world, pos, |components| components.tank_component(dir)).is_some()
    }

    fn get_component(
        &self,
        world: &dyn WorldView,
        pos: VoxelPos,
        dir: Option<BlockFace>,
    ) -> ComponentResult<Option<Box<dyn TankComponent>>> {
        let found = Self::find(world, pos, |components| components.tank_component(dir));
        Ok(found.map(boxed_tank))
    }
}

impl Hook for ItemComponentHook {
    fn id(&self) -> &str {
        Self::ID
    }
}

impl ItemHook<dyn InventoryComponent> for ItemComponentHook {
    fn has_component(&self, stack: &SharedStack) -> bool {
        matches!(Self::inventory(stack), Ok(Some(_)))
    }

    fn get_component(
        &self,
        stack: &SharedStack,
    ) -> ComponentResult<Option<Box<dyn InventoryComponent>>> {
        Ok(Self::inventory(stack)?.map(boxed_inventory))
    }
}

impl ItemHook<dyn TankComponent> for ItemComponentHook {
    fn has_component(&self, stack: &SharedStack) -> bool {
        matches!(Self::tank(stack), Ok(Some(_)))
    }

    fn get_component(
        &self,
        stack: &SharedStack,
    ) -> ComponentResult<Option<Box<dyn TankComponent>>> {
        Ok(Self::tank(stack)?.map(boxed_tank))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionType;
    use crate::component::{SimpleInventoryComponent, SimpleTankComponent};
    use crate::fluid::{FluidId, FluidVolume, BUCKET};
    use crate::world::{Entity, EntityId};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Cart {
        id: u32,
        alive: bool,
        inventory: SharedInventory,
    }

    impl ComponentProvider for Cart {
        fn inventory_component(&self, _side: Option<BlockFace>) -> Option<SharedInventory> {
            Some(self.inventory.clone())
        }
    }

    impl Entity for Cart {
        fn entity_id(&self) -> EntityId {
            EntityId(self.id)
        }

        fn is_alive(&self) -> bool {
            self.alive
        }

        fn components(&self) -> Option<&dyn ComponentProvider> {
            Some(self)
        }
    }

    /// Tank only reachable from above
    struct Cistern(SharedTank);

    impl ComponentProvider for Cistern {
        fn tank_component(&self, side: Option<BlockFace>) -> Option<SharedTank> {
            match side {
                Some(BlockFace::Top) | None => Some(self.0.clone()),
                _ => None,
            }
        }
    }

    #[derive(Default)]
    struct TestWorld {
        cistern_at: Option<(VoxelPos, Rc<Cistern>)>,
        carts: Vec<(VoxelPos, Rc<Cart>)>,
    }

    impl WorldView for TestWorld {
        fn block_components(&self, pos: VoxelPos) -> Option<Rc<dyn ComponentProvider>> {
            match &self.cistern_at {
                Some((at, cistern)) if *at == pos => {
                    Some(cistern.clone() as Rc<dyn ComponentProvider>)
                }
                _ => None,
            }
        }

        fn entities_at(&self, pos: VoxelPos) -> Vec<Rc<dyn Entity>> {
            self.carts
                .iter()
                .filter(|(at, _)| *at == pos)
                .map(|(_, cart)| cart.clone() as Rc<dyn Entity>)
                .collect()
        }
    }

    fn cart(id: u32, alive: bool, size: usize) -> Rc<Cart> {
        Rc::new(Cart {
            id,
            alive,
            inventory: Rc::new(RefCell::new(SimpleInventoryComponent::new(size))),
        })
    }

    #[test]
    fn test_block_components_respect_side() {
        let shared: SharedTank = Rc::new(RefCell::new(SimpleTankComponent::new(1, 8 * BUCKET)));
        let pos = VoxelPos::new(0, 10, 0);
        let world = TestWorld {
            cistern_at: Some((pos, Rc::new(Cistern(shared.clone())))),
            ..Default::default()
        };

        let hook = BlockComponentHook;
        let tanks: &dyn BlockHook<dyn TankComponent> = &hook;
        let has_tank = |face| tanks.has_component(&world, pos, face);
        assert!(has_tank(Some(BlockFace::Top)));
        assert!(!has_tank(Some(BlockFace::Left)));
        assert!(!BlockHook::<dyn InventoryComponent>::has_component(&hook, &world, pos, None));

        let mut tank = BlockHook::<dyn TankComponent>::get_component(&hook, &world, pos, None)
            .unwrap()
            .unwrap();
        tank.insert_fluid(0, FluidVolume::buckets(FluidId::WATER, 2), ActionType::Execute);
        assert_eq!(shared.borrow().contents(0).amount, 2 * BUCKET);
    }

    #[test]
    fn test_first_live_entity_wins() {
        let pos = VoxelPos::new(4, 0, 4);
        let dead = cart(1, false, 1);
        let first = cart(2, true, 2);
        let second = cart(3, true, 3);
        let world = TestWorld {
            carts: vec![(pos, dead), (pos, first), (pos, second)],
            ..Default::default()
        };

        let hook: &dyn BlockHook<dyn InventoryComponent> = &EntityComponentHook;
        let found = hook.get_component(&world, pos, None).unwrap();
        assert_eq!(found.map(|inv| inv.size()), Some(2));

        let empty = VoxelPos::new(0, 0, 0);
        assert!(!hook.has_component(&world, empty, None));
    }
}
