//! Tray stepper driven through a pattern output
//!
//! The tray motor is a unipolar stepper run in dual-phase full-step mode.
//! Each step writes the next entry of [`COIL_SEQUENCE`] to the coil port
//! and then blocks for the step delay from the ramp profile. The home
//! sensor is active low and sits at the black slot.
//!
//! # Usage
//!
//! ```ignore
//! let mut tray = TrayStepper::new(coils, home_pin, Delay, config.slots, config.speed);
//! tray.find_home();
//! tray.rotate_to(MaterialType::Steel);
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

use sortline_core::config::{SlotMap, SpeedProfile, STEPS_PER_REV};
use sortline_core::motion::{RampProfile, RotationPlan};
use sortline_core::sorting::MaterialType;
use sortline_core::traits::{Direction, PatternOutput, TrayDriver};

/// Coil port patterns, stepped forward for clockwise rotation
pub const COIL_SEQUENCE: [u8; 4] = [0b0011_0110, 0b0010_1110, 0b0010_1101, 0b0011_0101];

/// Tray stepper driver
pub struct TrayStepper<O, H, D> {
    coils: O,
    home: H,
    delay: D,
    slots: SlotMap,
    speed: SpeedProfile,
    /// Steps from home
    position: u16,
    /// Index into [`COIL_SEQUENCE`] of the energized phase
    coil: usize,
}

impl<O, H, D> TrayStepper<O, H, D>
where
    O: PatternOutput,
    H: InputPin,
    D: DelayNs,
{
    pub fn new(coils: O, home: H, delay: D, slots: SlotMap, speed: SpeedProfile) -> Self {
        Self {
            coils,
            home,
            delay,
            slots,
            speed,
            position: 0,
            coil: 0,
        }
    }

    /// Check the home sensor (active low)
    ///
    /// A read error counts as not at home, so homing keeps stepping.
    pub fn at_home(&mut self) -> bool {
        matches!(self.home.is_low(), Ok(true))
    }

    /// Index of the energized phase
    pub fn coil(&self) -> usize {
        self.coil
    }

    /// Run `steps` steps in `direction` with the ramp profile
    fn run(&mut self, steps: u16, direction: Direction) {
        // Hold the current phase before moving
        self.coils.write_pattern(COIL_SEQUENCE[self.coil]);

        for delay_ms in RampProfile::new(steps, &self.speed) {
            self.coil = match direction {
                Direction::Clockwise => (self.coil + 1) % COIL_SEQUENCE.len(),
                Direction::CounterClockwise => {
                    (self.coil + COIL_SEQUENCE.len() - 1) % COIL_SEQUENCE.len()
                }
            };
            self.coils.write_pattern(COIL_SEQUENCE[self.coil]);
            self.delay.delay_ms(u32::from(delay_ms));
        }
    }
}

impl<O, H, D> TrayDriver for TrayStepper<O, H, D>
where
    O: PatternOutput,
    H: InputPin,
    D: DelayNs,
{
    fn find_home(&mut self) -> u32 {
        let mut steps = 0u32;
        while !self.at_home() {
            self.run(1, Direction::Clockwise);
            steps += 1;
        }
        self.position = 0;
        steps
    }

    fn position(&self) -> u16 {
        self.position
    }

    fn slot_for(&self, material: MaterialType) -> u16 {
        self.slots.slot(material)
    }

    fn execute(&mut self, plan: &RotationPlan) {
        self.run(plan.steps, plan.direction);
        self.position = plan.target % STEPS_PER_REV;
    }
}
