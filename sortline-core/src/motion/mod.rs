//! Tray motion planning
//!
//! Shortest-path rotation between tray slots and the trapezoidal step delay
//! profile used to execute it.

pub mod planner;
pub mod ramp;

pub use planner::RotationPlan;
pub use ramp::RampProfile;
