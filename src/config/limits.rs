//! Machine travel and limit switch configuration.

use serde::Deserialize;

use crate::axis::{Axis, MotionTarget};

/// Default minimum travel (mm). Machine coordinates are negative-space.
pub const DEFAULT_MIN_TRAVEL: f32 = -200.0;

/// Default maximum travel (mm).
pub const DEFAULT_MAX_TRAVEL: f32 = 0.0;

/// Travel range of a single axis in machine coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AxisTravel {
    /// Minimum allowed position in mm.
    #[serde(default = "default_min", rename = "min_mm")]
    pub min: f32,

    /// Maximum allowed position in mm.
    #[serde(default = "default_max", rename = "max_mm")]
    pub max: f32,
}

fn default_min() -> f32 {
    DEFAULT_MIN_TRAVEL
}

fn default_max() -> f32 {
    DEFAULT_MAX_TRAVEL
}

impl AxisTravel {
    /// Create a new travel range.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Check if the range is valid (min < max).
    pub fn is_valid(&self) -> bool {
        self.min < self.max
    }

    /// Check if a position is within travel. Bounds are inclusive.
    pub fn contains(&self, position: f32) -> bool {
        position >= self.min && position <= self.max
    }
}

impl Default for AxisTravel {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TRAVEL, DEFAULT_MAX_TRAVEL)
    }
}

/// A target coordinate outside its axis travel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelViolation {
    /// Offending axis.
    pub axis: Axis,
    /// Requested position.
    pub position: f32,
    /// Travel range of the axis.
    pub travel: AxisTravel,
}

/// Limits configuration from the `[limits]` table.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct LimitsConfig {
    /// Reject targets outside machine travel.
    #[serde(default)]
    pub soft_limits: bool,

    /// Hard limit switches enabled (re-armed after homing).
    #[serde(default)]
    pub hard_limits: bool,

    /// X axis travel.
    #[serde(default)]
    pub x: AxisTravel,

    /// Y axis travel.
    #[serde(default)]
    pub y: AxisTravel,

    /// Z axis travel.
    #[serde(default)]
    pub z: AxisTravel,
}

impl LimitsConfig {
    /// Travel range of an axis.
    pub fn travel(&self, axis: Axis) -> &AxisTravel {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    /// First axis of `target` that lies outside travel, if any.
    pub fn check_travel(&self, target: &MotionTarget) -> Option<TravelViolation> {
        Axis::ALL.iter().find_map(|&axis| {
            let travel = *self.travel(axis);
            let position = target[axis.index()];
            if travel.contains(position) {
                None
            } else {
                Some(TravelViolation {
                    axis,
                    position,
                    travel,
                })
            }
        })
    }
}
