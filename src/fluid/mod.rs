//! Fluid amounts moved through tank components

pub mod volume;

pub use volume::{FluidId, FluidVolume, BUCKET};
