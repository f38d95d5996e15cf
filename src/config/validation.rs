//! Configuration validation.

use crate::axis::Axis;
use crate::error::{ConfigError, Error, Result};

use super::{HomingConfig, LimitsConfig, MotionSettings, SystemConfig};

/// Validate a system configuration.
///
/// Checks:
/// - Arc tolerance is finite and positive
/// - Arc correction interval is at least 1
/// - Axis travel ranges are valid (min < max)
/// - Homing has at least one cycle when enabled
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    validate_motion(&config.motion)?;
    validate_limits(&config.limits)?;
    validate_homing(&config.homing)?;
    Ok(())
}

fn validate_motion(settings: &MotionSettings) -> Result<()> {
    // NaN fails the comparison as well
    if !(settings.arc_tolerance.is_finite() && settings.arc_tolerance > 0.0) {
        return Err(Error::Config(ConfigError::InvalidArcTolerance(
            settings.arc_tolerance,
        )));
    }

    if settings.arc_correction_interval == 0 {
        return Err(Error::Config(ConfigError::InvalidCorrectionInterval(
            settings.arc_correction_interval,
        )));
    }

    Ok(())
}

fn validate_limits(limits: &LimitsConfig) -> Result<()> {
    for axis in Axis::ALL {
        let travel = limits.travel(axis);
        if !travel.is_valid() {
            return Err(Error::Config(ConfigError::InvalidTravel {
                axis,
                min: travel.min,
                max: travel.max,
            }));
        }
    }
    Ok(())
}

fn validate_homing(homing: &HomingConfig) -> Result<()> {
    // Deserialized groups are never empty, but programmatic configs may be
    if homing.cycles.iter().any(|mask| mask.is_empty()) {
        return Err(Error::Config(ConfigError::EmptyAxisMask));
    }

    if homing.enabled && homing.cycles.is_empty() {
        return Err(Error::Config(ConfigError::EmptyHomingSequence));
    }

    Ok(())
}
