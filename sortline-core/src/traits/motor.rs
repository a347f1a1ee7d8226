//! Conveyor motor trait
//!
//! The belt is driven by a DC motor through an H-bridge. Only forward
//! running is used; the bridge pattern for reverse exists on the board but
//! is never commanded.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Conveyor drive state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConveyorState {
    /// Belt running forward
    Start,
    /// Belt braked
    Stop,
    /// Bridge outputs released
    #[default]
    Disable,
}

/// Errors that can occur with motor operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// PWM peripheral rejected the duty cycle
    Pwm,
}

/// Trait for the conveyor motor
pub trait ConveyorDriver {
    /// Drive the bridge into `state`
    fn set_state(&mut self, state: ConveyorState);

    /// Last commanded state
    fn state(&self) -> ConveyorState;

    /// Set the PWM duty (out of 255)
    fn set_speed(&mut self, duty: u8) -> Result<(), MotorError>;

    /// Check if the belt is commanded to run
    fn is_running(&self) -> bool {
        self.state() == ConveyorState::Start
    }
}
