//! Error types for cnc-motion.
//!
//! Provides unified error handling across configuration and motion admission.
//! Safety-relevant faults are reported here *and* latched as an [`Alarm`] in
//! the shared system state.

use core::fmt;

use crate::axis::Axis;
use crate::system::Alarm;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all cnc-motion operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motion admission error
    Motion(MotionError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Arc tolerance must be finite and > 0
    InvalidArcTolerance(f32),
    /// Arc correction interval must be >= 1
    InvalidCorrectionInterval(u8),
    /// Axis travel limits invalid (min must be < max)
    InvalidTravel {
        /// Offending axis
        axis: Axis,
        /// Minimum travel
        min: f32,
        /// Maximum travel
        max: f32,
    },
    /// Axis letter not recognized in an axis group
    UnknownAxis(char),
    /// Axis group contains no axes
    EmptyAxisMask,
    /// Homing enabled without any homing cycle
    EmptyHomingSequence,
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motion admission errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionError {
    /// Target lies outside the configured travel of an axis
    SoftLimit {
        /// Offending axis
        axis: Axis,
        /// Requested position
        position: f32,
        /// Minimum travel
        min: f32,
        /// Maximum travel
        max: f32,
    },
    /// Machine is in the alarm state; motion refused until acknowledged
    AlarmLocked(Option<Alarm>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidArcTolerance(v) => {
                write!(f, "Invalid arc tolerance: {}. Must be > 0", v)
            }
            ConfigError::InvalidCorrectionInterval(v) => {
                write!(f, "Invalid arc correction interval: {}. Must be >= 1", v)
            }
            ConfigError::InvalidTravel { axis, min, max } => {
                write!(f, "Invalid travel for axis {}: min ({}) must be < max ({})", axis, min, max)
            }
            ConfigError::UnknownAxis(c) => write!(f, "Unknown axis '{}'", c),
            ConfigError::EmptyAxisMask => write!(f, "Axis group is empty"),
            ConfigError::EmptyHomingSequence => {
                write!(f, "Homing is enabled but no homing cycle is configured")
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::SoftLimit { axis, position, min, max } => write!(
                f,
                "Target {} on axis {} exceeds travel [{}, {}]",
                position, axis, min, max
            ),
            MotionError::AlarmLocked(Some(alarm)) => {
                write!(f, "Motion locked by alarm: {}", alarm)
            }
            MotionError::AlarmLocked(None) => write!(f, "Motion locked: machine in alarm state"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}
