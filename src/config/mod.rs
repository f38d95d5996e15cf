//! Configuration module for cnc-motion.
//!
//! Provides the machine settings consumed by the motion controllers: arc
//! tessellation, soft limits and homing groups. Loaded from TOML files (with
//! `std` feature) or constructed directly.

mod homing;
mod limits;
mod settings;
mod system;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use homing::{HomingConfig, MAX_HOMING_CYCLES};
pub use limits::{AxisTravel, LimitsConfig, TravelViolation};
pub use settings::{MotionSettings, DEFAULT_ARC_CORRECTION_INTERVAL, DEFAULT_ARC_TOLERANCE};
pub use system::SystemConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};
