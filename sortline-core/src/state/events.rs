//! Events that trigger mode transitions

use super::machine::FaultKind;
use crate::sorting::MaterialType;

/// Events that can trigger mode transitions
///
/// The controller reports the event it handled on each poll, so events that
/// do not change the mode (classification, sorting) are listed here too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Lifecycle events
    /// Tray homed and conveyor started
    BootComplete,

    // Item events
    /// An item passed the entry sensor and was queued
    ItemClassified(MaterialType),
    /// An item reached the exit and the tray was rotated to its bin
    ItemSorted(MaterialType),

    // Operator events
    /// Pause button toggled on
    Pause,
    /// Pause button toggled off
    Resume,
    /// Ramp-down countdown fired with the belt empty
    RampDown,
    /// Conveyor stopped and final counts shown
    RampDownComplete,

    // Fault events
    /// A fatal condition was detected
    FaultDetected(FaultKind),
}
