//! Stepper driver implementations

pub mod tray;

pub use tray::{TrayStepper, COIL_SEQUENCE};
