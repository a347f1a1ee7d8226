//! Motor driver implementations
//!
//! The conveyor is a brushed DC motor behind an H-bridge: drive lines
//! select forward, brake or release, and a PWM channel sets the speed.

pub mod conveyor;

pub use conveyor::{ConveyorMotor, DRIVE_BRAKE, DRIVE_DISABLED, DRIVE_FORWARD, DRIVE_REVERSE};
