//! Embassy async tasks
//!
//! Sensor and button handlers run on the high-priority interrupt executor
//! and only raise conditions; the controller task owns everything else.

pub mod buttons;
pub mod controller;
pub mod entry_sensor;
pub mod exit_sensor;

pub use buttons::{pause_button_task, ramp_down_button_task};
pub use controller::{controller_task, Conveyor, Tray};
pub use entry_sensor::entry_sensor_task;
pub use exit_sensor::exit_sensor_task;
