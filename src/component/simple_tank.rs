use super::TankComponent;
use crate::action::ActionType;
use crate::error::{ComponentError, ComponentResult};
use crate::fluid::FluidVolume;

/// How much of `incoming` fits into a tank holding `existing`
pub(crate) fn fillable_amount(
    existing: &FluidVolume,
    incoming: &FluidVolume,
    capacity: u64,
) -> u64 {
    if incoming.is_empty() || !existing.can_merge_with(incoming) {
        return 0;
    }
    let held = if existing.is_empty() { 0 } else { existing.amount };
    capacity.saturating_sub(held).min(incoming.amount)
}

/// Fixed number of equally sized tanks with no side effects
#[derive(Debug, Clone)]
pub struct SimpleTankComponent {
    tanks: Vec<FluidVolume>,
    capacity: u64,
}

impl SimpleTankComponent {
    pub fn new(tanks: usize, capacity: u64) -> Self {
        Self {
            tanks: vec![FluidVolume::empty(); tanks],
            capacity,
        }
    }

    fn check_tank(&self, tank: usize) -> ComponentResult<()> {
        if tank < self.tanks.len() {
            Ok(())
        } else {
            Err(ComponentError::InvalidTank {
                tank,
                tanks: self.tanks.len(),
            })
        }
    }
}

impl TankComponent for SimpleTankComponent {
    fn tanks(&self) -> usize {
        self.tanks.len()
    }

    fn contents(&self, tank: usize) -> FluidVolume {
        self.tanks.get(tank).copied().unwrap_or_default()
    }

    fn max_capacity(&self, tank: usize) -> u64 {
        if tank < self.tanks.len() {
            self.capacity
        } else {
            0
        }
    }

    fn can_insert(&self, tank: usize) -> bool {
        tank < self.tanks.len()
    }

    fn can_extract(&self, tank: usize) -> bool {
        tank < self.tanks.len()
    }

    fn take_fluid(&mut self, tank: usize, amount: u64, action: ActionType) -> FluidVolume {
        if !self.can_extract(tank) {
            return FluidVolume::empty();
        }
        let volume = &mut self.tanks[tank];
        if action.should_execute() {
            volume.split(amount)
        } else {
            let held = if volume.is_empty() { 0 } else { volume.amount };
            volume.with_amount(amount.min(held))
        }
    }

    fn remove_fluid(&mut self, tank: usize, action: ActionType) -> FluidVolume {
        self.take_fluid(tank, u64::MAX, action)
    }

    fn set_fluid(&mut self, tank: usize, fluid: FluidVolume) -> ComponentResult<()> {
        self.check_tank(tank)?;
        self.tanks[tank] = fluid;
        Ok(())
    }

    fn insert_fluid(&mut self, tank: usize, fluid: FluidVolume, action: ActionType) -> FluidVolume {
        if fluid.is_empty() || !self.can_insert(tank) || !self.is_acceptable_fluid(tank, &fluid) {
            return fluid;
        }

        let to_fill = fillable_amount(&self.tanks[tank], &fluid, self.capacity);
        if to_fill == 0 {
            return fluid;
        }

        if action.should_execute() {
            let existing = &mut self.tanks[tank];
            if existing.is_empty() {
                *existing = fluid.with_amount(to_fill);
            } else {
                existing.amount += to_fill;
            }
        }
        fluid.with_amount(fluid.amount - to_fill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fluid::{FluidId, BUCKET};

    #[test]
    fn test_fill_up_to_capacity() {
        let mut tank = SimpleTankComponent::new(1, 4 * BUCKET);
        let water = FluidVolume::buckets(FluidId::WATER, 5);
        let rest = tank.insert_fluid(0, water, ActionType::Execute);
        assert_eq!(rest, FluidVolume::buckets(FluidId::WATER, 1));
        assert_eq!(tank.contents(0).amount, 4 * BUCKET);
    }

    #[test]
    fn test_refuses_different_fluid() {
        let mut tank = SimpleTankComponent::new(1, 4 * BUCKET);
        tank.set_fluid(0, FluidVolume::buckets(FluidId::WATER, 1)).unwrap();
        let lava = FluidVolume::buckets(FluidId::LAVA, 1);
        assert_eq!(tank.insert_fluid(0, lava, ActionType::Execute), lava);
    }

    #[test]
    fn test_simulated_drain_is_read_only() {
        let mut tank = SimpleTankComponent::new(2, 4 * BUCKET);
        tank.set_fluid(1, FluidVolume::buckets(FluidId::OIL, 2)).unwrap();

        let preview = tank.remove_fluid(1, ActionType::Simulate);
        assert_eq!(preview.amount, 2 * BUCKET);
        assert_eq!(tank.contents(1).amount, 2 * BUCKET);

        let drained = tank.take_fluid(1, 500, ActionType::Execute);
        assert_eq!(drained, FluidVolume::new(FluidId::OIL, 500));
        assert_eq!(tank.amount_of(FluidId::OIL), 1500);
    }

    #[test]
    fn test_insert_anywhere_prefers_matching_tank() {
        let mut tank = SimpleTankComponent::new(3, 2 * BUCKET);
        tank.set_fluid(2, FluidVolume::new(FluidId::WATER, 1500)).unwrap();

        let water = FluidVolume::new(FluidId::WATER, 1000);
        let rest = tank.insert_fluid_anywhere(water, ActionType::Execute);
        assert!(rest.is_empty());
        assert_eq!(tank.contents(2).amount, 2 * BUCKET);
        assert_eq!(tank.contents(0).amount, 500);
        assert!(tank.contents(1).is_empty());
    }
}
