//! Trapezoidal step delay profile
//!
//! Every move starts and ends at the slowest step rate. The delay drops by
//! one millisecond per step until it reaches the fastest rate, holds there,
//! then climbs back once the remaining distance is within the ramp length.
//! Moves too short to reach full speed get a truncated profile.
//!
//! ```text
//! 20 steps: 14 13 12 11 10 9 8 7 6 5 5 5 5 6 7 8 9 10 11 12
//! ```

use crate::config::SpeedProfile;

/// Iterator over per-step delays in ms for one move
#[derive(Debug, Clone)]
pub struct RampProfile {
    /// Delay for the next step
    delay: u16,
    /// Steps issued so far
    elapsed: u16,
    /// Steps left to issue
    remaining: u16,
    fastest: u16,
    slowest: u16,
    ramp: u16,
}

impl RampProfile {
    pub fn new(steps: u16, speed: &SpeedProfile) -> Self {
        Self {
            delay: speed.slowest_ms,
            elapsed: 0,
            remaining: steps,
            fastest: speed.fastest_ms,
            slowest: speed.slowest_ms,
            ramp: speed.ramp_steps(),
        }
    }

    /// Steps left in the move
    pub fn remaining(&self) -> u16 {
        self.remaining
    }
}

impl Iterator for RampProfile {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        if self.remaining == 0 {
            return None;
        }

        let delay = self.delay;

        // Accelerate over the first ramp steps
        if self.delay > self.fastest && self.elapsed < self.ramp {
            self.delay -= 1;
        }
        // Decelerate over the last ramp steps
        if self.delay < self.slowest && self.remaining < self.ramp {
            self.delay += 1;
        }

        self.elapsed += 1;
        self.remaining -= 1;

        Some(delay)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::from(self.remaining);
        (n, Some(n))
    }
}

impl ExactSizeIterator for RampProfile {}
