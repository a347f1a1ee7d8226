//! Board-agnostic core logic for the conveyor sorter firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (tray stepper, conveyor, display, output port)
//! - Reflectivity classification and the in-flight item queue
//! - Rotation planning (shortest path, trapezoidal ramp)
//! - Interrupt-shared condition signals
//! - System mode state machine and the main-loop controller
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod motion;
pub mod signals;
pub mod sorting;
pub mod state;
pub mod traits;
