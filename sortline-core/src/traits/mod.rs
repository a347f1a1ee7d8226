//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod display;
pub mod motor;
pub mod output;
pub mod stepper;

pub use display::{DisplayDriver, DisplayError, DisplayExt, DISPLAY_COLS, DISPLAY_ROWS};
pub use motor::{ConveyorDriver, ConveyorState, MotorError};
pub use output::PatternOutput;
pub use stepper::{Direction, TrayDriver};
