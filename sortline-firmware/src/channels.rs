//! State shared between the handler tasks and the controller
//!
//! Handlers run on the high-priority interrupt executor and only raise
//! conditions in [`SIGNALS`]. Every raise is followed by a [`WAKE`] so the
//! controller task polls again instead of spinning.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use sortline_core::signals::SorterSignals;

/// Conditions raised by handlers and consumed by the controller
pub static SIGNALS: SorterSignals = SorterSignals::new();

/// Wake the controller task after raising a condition
pub static WAKE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Raise-side helper: wake the controller after touching [`SIGNALS`]
pub fn notify() {
    WAKE.signal(());
}
