//! Bridges to other storage frameworks
//!
//! Each submodule owns one foreign vocabulary and the hook that translates it
//! into components. Which hooks get installed, and in what order, is decided
//! by [`crate::integration`].

pub mod capability;
pub mod components;
pub mod container;
pub mod item_inventory;

pub use capability::{
    Capability, CapabilityHook, CapabilityKind, CapabilityProvider, FluidHandler,
    FluidHandlerWrapper, ItemHandler, ItemHandlerWrapper,
};
pub use components::{BlockComponentHook, EntityComponentHook, ItemComponentHook};
pub use container::{BasicContainer, Container, ContainerHook, ContainerWrapper, SharedContainer};
pub use item_inventory::{ItemInventory, ItemInventoryHook, WrappedItemInventory};
