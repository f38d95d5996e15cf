//! Motion module for cnc-motion.
//!
//! Turns requested moves, arcs, dwells, homing passes and probes into gated
//! planner submissions. [`MotionControl`] carries every operation; the reset
//! coordinator is also available as a free function for interrupt handlers.

pub mod arc;
mod control;
mod dwell;
mod gateway;
mod homing;
#[cfg(feature = "parking")]
mod parking;
mod probe;
mod request;
mod reset;
pub mod rotation;

pub use arc::{ArcDirection, ArcPoint, ArcSegments, ArcSpec, Plane};
pub use control::MotionControl;
pub use dwell::{DelayMode, DWELL_TIME_STEP_MS};
pub use gateway::LineOutcome;
pub use homing::HomingOutcome;
pub use probe::{ProbeFlags, ProbeOutcome};
pub use request::LineRequest;
pub use reset::reset;
pub use rotation::{ExactRotation, Rotation, SmallAngle};
