use crate::action::ActionType;
use crate::error::ComponentResult;
use crate::fluid::{FluidId, FluidVolume};

/// Tank-based fluid storage exposed by a block, entity or item stack
///
/// Same simulate/execute contract as
/// [`InventoryComponent`](super::InventoryComponent).
pub trait TankComponent {
    /// Number of tanks
    fn tanks(&self) -> usize;

    /// Fluid currently in `tank`; empty when out of range
    fn contents(&self, tank: usize) -> FluidVolume;

    /// Capacity of `tank` in millibuckets
    fn max_capacity(&self, tank: usize) -> u64;

    fn can_insert(&self, tank: usize) -> bool;

    fn can_extract(&self, tank: usize) -> bool;

    /// Take up to `amount` out of `tank`, returning what was taken
    fn take_fluid(&mut self, tank: usize, amount: u64, action: ActionType) -> FluidVolume;

    /// Take everything out of `tank`
    fn remove_fluid(&mut self, tank: usize, action: ActionType) -> FluidVolume;

    /// Replace the contents of `tank` unconditionally
    fn set_fluid(&mut self, tank: usize, fluid: FluidVolume) -> ComponentResult<()>;

    /// Insert into `tank`, returning whatever did not fit
    fn insert_fluid(&mut self, tank: usize, fluid: FluidVolume, action: ActionType) -> FluidVolume;

    /// Insert wherever the fluid fits, topping up tanks of the same fluid first
    fn insert_fluid_anywhere(&mut self, fluid: FluidVolume, action: ActionType) -> FluidVolume {
        let mut remaining = fluid;

        for tank in 0..self.tanks() {
            if remaining.is_empty() {
                return remaining;
            }
            let contents = self.contents(tank);
            if !contents.is_empty() && contents.fluid() == remaining.fluid() {
                remaining = self.insert_fluid(tank, remaining, action);
            }
        }

        for tank in 0..self.tanks() {
            if remaining.is_empty() {
                break;
            }
            if self.contents(tank).is_empty() {
                remaining = self.insert_fluid(tank, remaining, action);
            }
        }

        remaining
    }

    fn is_acceptable_fluid(&self, _tank: usize, _fluid: &FluidVolume) -> bool {
        true
    }

    /// Total amount of `fluid` across all tanks
    fn amount_of(&self, fluid: FluidId) -> u64 {
        (0..self.tanks())
            .map(|tank| self.contents(tank))
            .filter(|volume| volume.fluid() == Some(fluid))
            .map(|volume| volume.amount)
            .sum()
    }

    fn is_empty(&self) -> bool {
        (0..self.tanks()).all(|tank| self.contents(tank).is_empty())
    }
}
