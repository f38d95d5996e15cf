//! Motion settings: arc tessellation and laser mode.

use serde::Deserialize;

/// Default maximum chordal deviation of arc segments (mm).
pub const DEFAULT_ARC_TOLERANCE: f32 = 0.002;

/// Default number of incremental rotations between exact arc corrections.
pub const DEFAULT_ARC_CORRECTION_INTERVAL: u8 = 12;

/// Motion settings from the `[motion]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MotionSettings {
    /// Maximum distance between an arc segment and the true arc, in mm.
    #[serde(default = "default_arc_tolerance", rename = "arc_tolerance_mm")]
    pub arc_tolerance: f32,

    /// Incremental rotations between exact trigonometric corrections.
    ///
    /// Lower values bound floating-point drift more tightly at the cost of
    /// more `sin`/`cos` evaluations. Typical range 4-20.
    #[serde(default = "default_arc_correction_interval")]
    pub arc_correction_interval: u8,

    /// Laser mode: zero-length moves still synchronize spindle power.
    #[serde(default)]
    pub laser_mode: bool,
}

fn default_arc_tolerance() -> f32 {
    DEFAULT_ARC_TOLERANCE
}

fn default_arc_correction_interval() -> u8 {
    DEFAULT_ARC_CORRECTION_INTERVAL
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            arc_tolerance: DEFAULT_ARC_TOLERANCE,
            arc_correction_interval: DEFAULT_ARC_CORRECTION_INTERVAL,
            laser_mode: false,
        }
    }
}
