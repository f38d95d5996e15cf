//! Homing cycle configuration.

use heapless::Vec;
use serde::Deserialize;

use crate::axis::AxisMask;

/// Maximum number of homing cycle groups.
pub const MAX_HOMING_CYCLES: usize = 3;

/// Homing configuration from the `[homing]` table.
///
/// ```toml
/// [homing]
/// enabled = true
/// cycles = ["z", "xy"]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HomingConfig {
    /// Homing cycle allowed. Checked by the command layer before it calls
    /// `homing_cycle`.
    #[serde(default)]
    pub enabled: bool,

    /// Axis groups homed in order when no explicit mask is given.
    #[serde(default = "default_cycles")]
    pub cycles: Vec<AxisMask, MAX_HOMING_CYCLES>,
}

fn default_cycles() -> Vec<AxisMask, MAX_HOMING_CYCLES> {
    let mut cycles = Vec::new();
    // Capacity is 3; two pushes cannot fail.
    let _ = cycles.push(AxisMask::Z);
    let _ = cycles.push(AxisMask::X | AxisMask::Y);
    cycles
}

impl Default for HomingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            cycles: default_cycles(),
        }
    }
}

impl HomingConfig {
    /// Union of every configured cycle group.
    pub fn all_axes(&self) -> AxisMask {
        self.cycles
            .iter()
            .fold(AxisMask::empty(), |acc, &mask| acc | mask)
    }
}
