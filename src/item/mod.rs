pub mod item_type;
pub mod stack;

pub use item_type::{Item, ItemId, MAX_STACK_SIZE};
pub use stack::{ItemStack, SharedStack};
