//! Sensor implementations
//!
//! - Edge-triggered digital lines (entry, exit, buttons, home)
//! - Reflectivity ADC scaling

pub mod line;
pub mod reflectivity;

pub use line::{ActiveLevel, SensorLine};
pub use reflectivity::scale_adc;
