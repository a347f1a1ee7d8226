//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in sortline-core on top of `embedded-hal` 1.0:
//!
//! - Pin-bus pattern output (stepper coils, conveyor bridge)
//! - Tray stepper (dual-phase full step, homing, ramped moves)
//! - Conveyor motor (H-bridge drive patterns, PWM duty)
//! - Sensors (edge-triggered digital lines, reflectivity ADC scaling)
//! - Two-line text buffer display

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
pub mod gpio;
pub mod motor;
pub mod sensor;
pub mod stepper;
