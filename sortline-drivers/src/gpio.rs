//! Pin-bus pattern output
//!
//! Drives a group of GPIO lines from a bit pattern, bit 0 on the first pin.
//! The stepper coils and the conveyor bridge are both wired this way.

use core::convert::Infallible;

use embedded_hal::digital::{OutputPin, PinState};
use sortline_core::traits::PatternOutput;

/// `N` output pins written together as one pattern
pub struct PinBus<P, const N: usize> {
    pins: [P; N],
    pattern: u8,
}

impl<P, const N: usize> PinBus<P, N>
where
    P: OutputPin<Error = Infallible>,
{
    /// Create a bus and drive every line low
    pub fn new(pins: [P; N]) -> Self {
        let mut bus = Self { pins, pattern: 0 };
        bus.write_pattern(0);
        bus
    }

    /// Last pattern written
    pub fn pattern(&self) -> u8 {
        self.pattern
    }

    pub fn release(self) -> [P; N] {
        self.pins
    }
}

impl<P, const N: usize> PatternOutput for PinBus<P, N>
where
    P: OutputPin<Error = Infallible>,
{
    fn write_pattern(&mut self, pattern: u8) {
        for (bit, pin) in self.pins.iter_mut().enumerate() {
            let _ = pin.set_state(PinState::from(pattern & (1 << bit) != 0));
        }
        self.pattern = pattern;
    }
}
