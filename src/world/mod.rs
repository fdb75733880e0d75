//! World-side types used to address block and entity targets

mod position;
mod view;

pub use position::{BlockFace, VoxelPos};
pub use view::{BlockEntity, Entity, EntityId, WorldView};
