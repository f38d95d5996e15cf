//! System configuration - root configuration structure.

use serde::Deserialize;

use super::homing::HomingConfig;
use super::limits::LimitsConfig;
use super::settings::MotionSettings;

/// Root configuration structure from TOML.
///
/// Every table is optional; missing tables take their defaults.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SystemConfig {
    /// Arc and laser settings.
    #[serde(default)]
    pub motion: MotionSettings,

    /// Machine travel and limit switches.
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Homing cycle groups.
    #[serde(default)]
    pub homing: HomingConfig,
}

impl SystemConfig {
    /// Motion settings.
    pub fn motion(&self) -> &MotionSettings {
        &self.motion
    }

    /// Limits configuration.
    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    /// Homing configuration.
    pub fn homing(&self) -> &HomingConfig {
        &self.homing
    }
}
