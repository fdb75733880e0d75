use std::sync::Arc;

use super::hooks::{BlockHook, DualHook, Hook, ItemHook};
use crate::component::{InventoryComponent, TankComponent};
use crate::error::{ComponentError, ComponentResult};
use crate::item::SharedStack;
use crate::world::{BlockFace, VoxelPos, WorldView};

/// Ordered hook lists for one capability kind
///
/// Queries walk the hooks in registration order and the first hook that
/// answers wins, so earlier registrations take priority. Passing a hook id as
/// `ignore` skips that one hook; a hook that queries the registry from inside
/// its own resolution must pass its own id, or it may be asked to resolve
/// itself forever.
///
/// The guard only covers one hop. Two hooks with different ids that keep
/// delegating to each other are not detected.
pub struct ComponentHelper<C: ?Sized> {
    block_hooks: Vec<Arc<dyn BlockHook<C>>>,
    item_hooks: Vec<Arc<dyn ItemHook<C>>>,
    frozen: bool,
}

/// Registry of inventory hooks
pub type InventoryComponentHelper = ComponentHelper<dyn InventoryComponent>;

/// Registry of tank hooks
pub type TankComponentHelper = ComponentHelper<dyn TankComponent>;

/// `None` behaves like an empty ignore id
fn skip(hook_id: &str, ignore: Option<&str>) -> bool {
    hook_id == ignore.unwrap_or("")
}

impl<C: ?Sized> ComponentHelper<C> {
    pub fn new() -> Self {
        Self {
            block_hooks: Vec::new(),
            item_hooks: Vec::new(),
            frozen: false,
        }
    }

    /// Add a hook for components on blocks, or on entities at a position
    pub fn add_block_hook(&mut self, hook: Arc<dyn BlockHook<C>>) -> ComponentResult<()> {
        self.ensure_open(hook.id())?;
        log::debug!(
            "[ComponentHelper] block hook '{}' registered at priority {}",
            hook.id(),
            self.block_hooks.len()
        );
        self.block_hooks.push(hook);
        Ok(())
    }

    /// Add a hook for components on item stacks
    pub fn add_item_hook(&mut self, hook: Arc<dyn ItemHook<C>>) -> ComponentResult<()> {
        self.ensure_open(hook.id())?;
        log::debug!(
            "[ComponentHelper] item hook '{}' registered at priority {}",
            hook.id(),
            self.item_hooks.len()
        );
        self.item_hooks.push(hook);
        Ok(())
    }

    /// Add one hook to both the block and the item list
    pub fn add_dual_hook<H>(&mut self, hook: Arc<H>) -> ComponentResult<()>
    where
        H: DualHook<C> + 'static,
    {
        self.ensure_open(hook.id())?;
        self.add_block_hook(hook.clone())?;
        self.add_item_hook(hook)
    }

    /// Reject any further registration
    pub fn freeze(&mut self) {
        if !self.frozen {
            log::debug!(
                "[ComponentHelper] frozen with {} block hooks and {} item hooks",
                self.block_hooks.len(),
                self.item_hooks.len()
            );
        }
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Block hook ids in priority order
    pub fn block_hook_ids(&self) -> Vec<&str> {
        self.block_hooks.iter().map(|hook| hook.id()).collect()
    }

    /// Item hook ids in priority order
    pub fn item_hook_ids(&self) -> Vec<&str> {
        self.item_hooks.iter().map(|hook| hook.id()).collect()
    }

    /// Query whether a block, or an entity in it, has a compatible component
    pub fn has_block_component(
        &self,
        world: &dyn WorldView,
        pos: VoxelPos,
        dir: Option<BlockFace>,
        ignore: Option<&str>,
    ) -> bool {
        for hook in &self.block_hooks {
            if skip(hook.id(), ignore) {
                log::trace!("[ComponentHelper] skipping ignored block hook '{}'", hook.id());
                continue;
            }
            if hook.has_component(world, pos, dir) {
                return true;
            }
        }
        false
    }

    /// Get a compatible component on a block, or on an entity in it
    ///
    /// Errors raised by a hook are returned as-is.
    pub fn get_block_component(
        &self,
        world: &dyn WorldView,
        pos: VoxelPos,
        dir: Option<BlockFace>,
        ignore: Option<&str>,
    ) -> ComponentResult<Option<Box<C>>> {
        for hook in &self.block_hooks {
            if skip(hook.id(), ignore) {
                log::trace!("[ComponentHelper] skipping ignored block hook '{}'", hook.id());
                continue;
            }
            if let Some(component) = hook.get_component(world, pos, dir)? {
                return Ok(Some(component));
            }
        }
        Ok(None)
    }

    /// Query whether a stack has a compatible component
    pub fn has_item_component(&self, stack: &SharedStack, ignore: Option<&str>) -> bool {
        for hook in &self.item_hooks {
            if skip(hook.id(), ignore) {
                log::trace!("[ComponentHelper] skipping ignored item hook '{}'", hook.id());
                continue;
            }
            if hook.has_component(stack) {
                return true;
            }
        }
        false
    }

    /// Get a compatible component on a stack
    pub fn get_item_component(
        &self,
        stack: &SharedStack,
        ignore: Option<&str>,
    ) -> ComponentResult<Option<Box<C>>> {
        for hook in &self.item_hooks {
            if skip(hook.id(), ignore) {
                log::trace!("[ComponentHelper] skipping ignored item hook '{}'", hook.id());
                continue;
            }
            if let Some(component) = hook.get_component(stack)? {
                return Ok(Some(component));
            }
        }
        Ok(None)
    }

    fn ensure_open(&self, hook_id: &str) -> ComponentResult<()> {
        if self.frozen {
            log::warn!("[ComponentHelper] rejected hook '{}' after freeze", hook_id);
            return Err(ComponentError::RegistryFrozen {
                hook_id: hook_id.to_string(),
            });
        }
        Ok(())
    }
}

impl<C: ?Sized> Default for ComponentHelper<C> {
    fn default() -> Self {
        Self::new()
    }
}
