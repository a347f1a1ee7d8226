//! Mode definition
//!
//! All conveyor, tray and display behavior is a function of the current
//! mode and an event.

use super::events::Event;

/// Sorter modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Power-on, tray homing
    Boot,
    /// Belt running, items being classified and sorted
    Running,
    /// Belt stopped by the operator; sensor conditions stay pending
    Paused,
    /// Belt empty after a ramp-down request, shutting down
    RampingDown,
    /// Orderly shutdown complete
    Halted,
    /// Fatal condition; conveyor disabled
    Fault(FaultKind),
}

/// Types of fatal conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FaultKind {
    /// An interrupt fired with no handler bound to it
    UnhandledInterrupt = 1,
    /// Item reached the exit with nothing queued
    QueueUnderflow = 2,
    /// More items on the belt than the queue can track
    QueueOverflow = 3,
}

impl FaultKind {
    /// Non-zero code used to pass the fault through an atomic cell
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decode a fault code; zero and unknown codes are no fault
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(FaultKind::UnhandledInterrupt),
            2 => Some(FaultKind::QueueUnderflow),
            3 => Some(FaultKind::QueueOverflow),
            _ => None,
        }
    }

    /// Message shown on the display
    pub const fn message(self) -> &'static str {
        match self {
            FaultKind::UnhandledInterrupt => "ERROR: BAD ISR!",
            FaultKind::QueueUnderflow | FaultKind::QueueOverflow => "ERROR: QUEUE",
        }
    }
}

impl Mode {
    /// Check if this is a fault mode
    pub fn is_fault(&self) -> bool {
        matches!(self, Mode::Fault(_))
    }

    /// Check if this mode is never left
    pub fn is_terminal(&self) -> bool {
        matches!(self, Mode::Halted | Mode::Fault(_))
    }

    /// Process an event and return the next mode
    ///
    /// Events that do not apply to the current mode leave it unchanged.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Mode::*;

        match (self, event) {
            // Terminal modes absorb everything
            (Halted, _) | (Fault(_), _) => self,

            (_, FaultDetected(kind)) => Fault(kind),

            (Boot, BootComplete) => Running,

            (Running, Pause) => Paused,
            (Running, RampDown) => RampingDown,

            (Paused, Resume) => Running,

            (RampingDown, RampDownComplete) => Halted,

            // Item events and anything out of order
            _ => self,
        }
    }
}
