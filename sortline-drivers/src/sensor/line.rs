//! Edge-triggered digital sensor line
//!
//! Wraps an input pin with a known active level so the entry sensor
//! (active high), the exit sensor, the buttons and the home sensor (all
//! active low) can be awaited the same way.
//!
//! # Usage
//!
//! ```ignore
//! let mut exit = SensorLine::new(pin, ActiveLevel::Low);
//! loop {
//!     exit.wait_for_activation().await?;
//!     SIGNALS.flag_item_at_exit();
//! }
//! ```

use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;

/// Pin level that means "object present" or "button pressed"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    High,
    Low,
}

/// A digital sensor or button input
pub struct SensorLine<P> {
    pin: P,
    active: ActiveLevel,
}

impl<P> SensorLine<P>
where
    P: InputPin + Wait,
{
    pub fn new(pin: P, active: ActiveLevel) -> Self {
        Self { pin, active }
    }

    /// Check if the line is currently at its active level
    pub fn is_active(&mut self) -> Result<bool, P::Error> {
        match self.active {
            ActiveLevel::High => self.pin.is_high(),
            ActiveLevel::Low => self.pin.is_low(),
        }
    }

    /// Wait for the edge into the active level
    pub async fn wait_for_activation(&mut self) -> Result<(), P::Error> {
        match self.active {
            ActiveLevel::High => self.pin.wait_for_rising_edge().await,
            ActiveLevel::Low => self.pin.wait_for_falling_edge().await,
        }
    }

    /// Wait until the line is back at its idle level
    pub async fn wait_for_release(&mut self) -> Result<(), P::Error> {
        match self.active {
            ActiveLevel::High => self.pin.wait_for_low().await,
            ActiveLevel::Low => self.pin.wait_for_high().await,
        }
    }
}
