//! Host world boundary
//!
//! The component system never owns world state. Hooks look things up through
//! these traits, which the host implements over its own chunk and entity
//! storage. Every lookup defaults to "nothing here" so a host only has to
//! expose what it actually has.

use std::rc::Rc;

use super::VoxelPos;
use crate::compat::capability::CapabilityProvider;
use crate::compat::container::SharedContainer;
use crate::component::ComponentProvider;

/// Read access to the world as seen by component hooks
pub trait WorldView {
    /// Components attached to the block at `pos` by the block component framework
    fn block_components(&self, _pos: VoxelPos) -> Option<Rc<dyn ComponentProvider>> {
        None
    }

    /// Block entity at `pos`, if the block has one
    fn block_entity(&self, _pos: VoxelPos) -> Option<Rc<dyn BlockEntity>> {
        None
    }

    /// Entities whose bounds overlap the block at `pos`
    fn entities_at(&self, _pos: VoxelPos) -> Vec<Rc<dyn Entity>> {
        Vec::new()
    }
}

/// A block with additional data attached
pub trait BlockEntity {
    fn position(&self) -> VoxelPos;

    /// Engine-native slot storage, if this block entity has any
    fn container(&self) -> Option<SharedContainer> {
        None
    }

    /// Capability framework provider, if this block entity exposes one
    fn capabilities(&self) -> Option<&dyn CapabilityProvider> {
        None
    }
}

/// Unique identifier for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// A free-moving object in the world
pub trait Entity {
    fn entity_id(&self) -> EntityId;

    /// Removed entities linger until the next tick and must not be queried
    fn is_alive(&self) -> bool {
        true
    }

    /// Components attached by the entity component framework
    fn components(&self) -> Option<&dyn ComponentProvider> {
        None
    }
}
