//! Shortest-path rotation planning
//!
//! The tray is a circle of [`STEPS_PER_REV`] positions. Any target can be
//! reached in at most half a revolution, so a move longer than that is
//! replaced by the complementary move in the other direction.

use crate::config::{HALF_REV, STEPS_PER_REV};
use crate::traits::Direction;

/// A planned tray move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RotationPlan {
    /// Position before the move
    pub from: u16,
    /// Position after the move
    pub target: u16,
    pub direction: Direction,
    /// Number of steps, never more than half a revolution
    pub steps: u16,
}

impl RotationPlan {
    /// Plan the shortest move from `current` to `target`
    ///
    /// Both positions must be within one revolution. A zero-length move
    /// plans as clockwise with no steps.
    pub fn between(current: u16, target: u16) -> Self {
        let delta = i32::from(target) - i32::from(current);

        let mut direction = if delta >= 0 {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        };
        let mut steps = delta.unsigned_abs() as u16;

        if steps > HALF_REV {
            steps = STEPS_PER_REV - steps;
            direction = direction.opposite();
        }

        Self {
            from: current,
            target,
            direction,
            steps,
        }
    }

    /// Check if the tray is already at the target
    pub fn is_noop(&self) -> bool {
        self.steps == 0
    }

    /// Position reached after `steps` steps of this move
    pub fn position_after(&self, steps: u16) -> u16 {
        let steps = steps % STEPS_PER_REV;
        match self.direction {
            Direction::Clockwise => (self.from + steps) % STEPS_PER_REV,
            Direction::CounterClockwise => (self.from + STEPS_PER_REV - steps) % STEPS_PER_REV,
        }
    }
}
