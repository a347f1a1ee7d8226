//! Operator display
//!
//! The rig has no character panel wired to the RP2040 board; the two-line
//! display is mirrored over RTT instead.

mod console;

pub use console::ConsoleDisplay;
