//! Hook registry and resolution
//!
//! Capability providers register hooks here; callers ask the registry, never
//! a provider directly, so mods that know nothing about each other can still
//! find each other's inventories and tanks.
//!
//! Key pieces:
//! - `Hook`, `BlockHook`, `ItemHook`, `DualHook`: provider contracts
//! - `ComponentHelper`: ordered, first-match-wins resolution with a
//!   single-id re-entrancy guard

pub mod component_helper;
pub mod hooks;

pub use component_helper::{ComponentHelper, InventoryComponentHelper, TankComponentHelper};
pub use hooks::{BlockHook, DualHook, Hook, ItemHook};
