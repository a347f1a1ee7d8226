//! Configuration types
//!
//! Board-agnostic configuration structures. The sorter is calibrated at
//! build time; nothing here is changed while the belt is running.

pub mod types;

pub use types::*;
