use serde::{Deserialize, Serialize};

/// One bucket of fluid, in millibuckets
pub const BUCKET: u64 = 1000;

/// Unique identifier for a fluid type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FluidId(pub u32);

/// Common fluid IDs
impl FluidId {
    pub const WATER: FluidId = FluidId(1);
    pub const LAVA: FluidId = FluidId(2);
    pub const OIL: FluidId = FluidId(3);
}

/// An amount of a single fluid, in millibuckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FluidVolume {
    pub fluid: Option<FluidId>,
    pub amount: u64,
}

impl FluidVolume {
    pub fn new(fluid: FluidId, amount: u64) -> Self {
        Self {
            fluid: Some(fluid),
            amount,
        }
    }

    /// The empty volume
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn buckets(fluid: FluidId, buckets: u64) -> Self {
        Self::new(fluid, buckets * BUCKET)
    }

    pub fn is_empty(&self) -> bool {
        self.fluid.is_none() || self.amount == 0
    }

    /// Fluid id, or `None` when the volume is empty
    pub fn fluid(&self) -> Option<FluidId> {
        if self.is_empty() {
            None
        } else {
            self.fluid
        }
    }

    /// Whether the two volumes can share one tank
    pub fn can_merge_with(&self, other: &FluidVolume) -> bool {
        self.is_empty() || other.is_empty() || self.fluid() == other.fluid()
    }

    /// Copy of this volume with a different amount
    pub fn with_amount(&self, amount: u64) -> FluidVolume {
        match self.fluid() {
            Some(fluid) if amount > 0 => FluidVolume::new(fluid, amount),
            _ => FluidVolume::empty(),
        }
    }

    /// Take up to `amount` out of this volume
    pub fn split(&mut self, amount: u64) -> FluidVolume {
        let taken = amount.min(if self.is_empty() { 0 } else { self.amount });
        let result = self.with_amount(taken);
        self.amount -= taken;
        if self.amount == 0 {
            *self = FluidVolume::empty();
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_clears_drained_volume() {
        let mut water = FluidVolume::buckets(FluidId::WATER, 2);
        let half = water.split(BUCKET);
        assert_eq!(half, FluidVolume::new(FluidId::WATER, BUCKET));
        assert_eq!(water.amount, BUCKET);

        let rest = water.split(5 * BUCKET);
        assert_eq!(rest.amount, BUCKET);
        assert!(water.is_empty());
        assert_eq!(water.fluid(), None);
    }

    #[test]
    fn test_merge_rules() {
        let water = FluidVolume::new(FluidId::WATER, 10);
        let lava = FluidVolume::new(FluidId::LAVA, 10);
        assert!(water.can_merge_with(&FluidVolume::empty()));
        assert!(water.can_merge_with(&water));
        assert!(!water.can_merge_with(&lava));
    }
}
