//! # cnc-motion
//!
//! Motion-issuing core for CNC controllers: the layer between a G-code
//! interpreter and the trajectory planner/step executor.
//!
//! ## Features
//!
//! - **Single gateway**: every move, arc segment and probe passes through
//!   [`MotionControl::line`], which enforces alarm lock, soft limits, check
//!   mode, abort and buffer backpressure
//! - **Arc tessellation**: bounded chordal error, small-angle incremental
//!   rotation with periodic exact correction
//! - **Cycles**: dwell, homing, probing and buffer-bypassing parking
//! - **Interrupt-safe state**: lock-free [`SystemState`] shared with the
//!   realtime context, idempotent [`motion::reset`]
//! - **no_std compatible**: no allocation, fixed-capacity collections
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cnc_motion::{LineRequest, MotionControl, SystemConfig, SystemState};
//!
//! static SYS: SystemState = SystemState::new();
//!
//! let config: SystemConfig = cnc_motion::load_config("machine.toml")?;
//! let mut mc = MotionControl::new(&SYS, &config, machine, delay);
//!
//! mc.line(&[-10.0, -10.0, 0.0], &LineRequest::feed(600.0))?;
//! mc.dwell(0.5);
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `parking` (default): Parking motion and parking override control
//! - `homing-single-axis` (default): Home only the axes of a non-empty mask
//! - `dual-limit-switches` (default): Refuse to home while a limit is engaged
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Logging macros, must come first
#[macro_use]
mod fmt;

// Core modules
pub mod axis;
pub mod config;
pub mod error;
pub mod interface;
pub mod motion;
pub mod system;

// Re-exports for ergonomic API
pub use axis::{Axis, AxisMask, MotionTarget, N_AXIS};
pub use config::{validate_config, SystemConfig};
pub use error::{Error, Result};
pub use interface::Machine;
pub use motion::{
    ArcDirection, ArcSpec, HomingOutcome, LineOutcome, LineRequest, MotionControl, Plane,
    ProbeFlags, ProbeOutcome,
};
pub use system::{Alarm, MachineState, SystemState};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
