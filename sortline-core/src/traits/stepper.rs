//! Tray stepper trait
//!
//! The tray is driven by a unipolar stepper with a home sensor at the black
//! slot. Implementations own the coil sequencing and step timing; planning
//! lives in [`crate::motion`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::motion::RotationPlan;
use crate::sorting::MaterialType;

/// Motor rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Clockwise rotation (increasing position)
    Clockwise,
    /// Counter-clockwise rotation (decreasing position)
    CounterClockwise,
}

impl Direction {
    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Trait for the sorting tray
pub trait TrayDriver {
    /// Step until the home sensor asserts, then zero the position
    ///
    /// Blocks until home is found. Returns the number of steps taken.
    fn find_home(&mut self) -> u32;

    /// Current tray position in steps from home
    fn position(&self) -> u16;

    /// Tray position of the bin for `material`
    fn slot_for(&self, material: MaterialType) -> u16;

    /// Run a planned move to completion and record the new position
    fn execute(&mut self, plan: &RotationPlan);

    /// Plan the shortest move to the bin for `material`
    fn plan_for(&self, material: MaterialType) -> RotationPlan {
        RotationPlan::between(self.position(), self.slot_for(material))
    }

    /// Rotate to the bin for `material`
    fn rotate_to(&mut self, material: MaterialType) -> RotationPlan {
        let plan = self.plan_for(material);
        self.execute(&plan);
        plan
    }
}
