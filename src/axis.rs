//! Axis identifiers, axis masks and the per-axis position vector.

use core::fmt;

use bitflags::bitflags;
use serde::Deserialize;

use crate::error::ConfigError;

/// Number of controlled axes.
pub const N_AXIS: usize = 3;

/// Absolute per-axis position in machine units (millimeters).
pub type MotionTarget = [f32; N_AXIS];

/// A single machine axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// X axis.
    X = 0,
    /// Y axis.
    Y = 1,
    /// Z axis.
    Z = 2,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Axis; N_AXIS] = [Axis::X, Axis::Y, Axis::Z];

    /// Index into a [`MotionTarget`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Axis letter as used in G-code.
    pub const fn letter(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
        }
    }

    /// Parse an axis letter (case-insensitive).
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'X' => Some(Axis::X),
            'Y' => Some(Axis::Y),
            'Z' => Some(Axis::Z),
            _ => None,
        }
    }

    /// Single-axis mask for this axis.
    #[inline]
    pub const fn mask(self) -> AxisMask {
        AxisMask::from_bits_truncate(1 << self as u8)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

bitflags! {
    /// Set of axes, used for homing groups and limit switch states.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AxisMask: u8 {
        /// X axis.
        const X = 1 << 0;
        /// Y axis.
        const Y = 1 << 1;
        /// Z axis.
        const Z = 1 << 2;
    }
}

impl Default for AxisMask {
    fn default() -> Self {
        Self::empty()
    }
}

impl AxisMask {
    /// Parse an axis group such as `"xy"` or `"Z"`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownAxis` for letters other than X/Y/Z and
    /// `ConfigError::EmptyAxisMask` for an empty group.
    pub fn parse(group: &str) -> Result<Self, ConfigError> {
        let mut mask = AxisMask::empty();
        for c in group.chars().filter(|c| !c.is_whitespace()) {
            let axis = Axis::from_letter(c).ok_or(ConfigError::UnknownAxis(c))?;
            mask |= axis.mask();
        }
        if mask.is_empty() {
            return Err(ConfigError::EmptyAxisMask);
        }
        Ok(mask)
    }

    /// Iterate the axes contained in this mask.
    pub fn axes(self) -> impl Iterator<Item = Axis> {
        Axis::ALL.into_iter().filter(move |a| self.contains(a.mask()))
    }
}

impl<'de> Deserialize<'de> for AxisMask {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt::Write;
        let group = heapless::String::<8>::deserialize(deserializer)?;
        AxisMask::parse(group.as_str()).map_err(|e| {
            let mut buf = heapless::String::<64>::new();
            let _ = write!(buf, "{}", e);
            serde::de::Error::custom(buf.as_str())
        })
    }
}
