//! Alarm codes latched in the shared system state.

use core::fmt;

/// System alarm.
///
/// An alarm blocks motion admission until acknowledged. Codes match the
/// numbering reported to hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Alarm {
    /// Hard limit switch triggered. Position likely lost.
    HardLimit = 1,
    /// Target outside machine travel.
    SoftLimit = 2,
    /// Reset while in motion. Position likely lost.
    AbortCycle = 3,
    /// Probe already triggered before the probe cycle started.
    ProbeFailInitial = 4,
    /// Probe did not contact within the programmed travel.
    ProbeFailContact = 5,
    /// Reset during an active homing cycle.
    HomingFailReset = 6,
    /// Safety door opened during homing.
    HomingFailDoor = 7,
    /// Pull-off motion failed to clear the limit switch.
    HomingFailPulloff = 8,
    /// Limit switch not found within search distance.
    HomingFailApproach = 9,
}

impl Alarm {
    /// Numeric alarm code.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decode a numeric alarm code. Zero and unknown codes yield `None`.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Alarm::HardLimit),
            2 => Some(Alarm::SoftLimit),
            3 => Some(Alarm::AbortCycle),
            4 => Some(Alarm::ProbeFailInitial),
            5 => Some(Alarm::ProbeFailContact),
            6 => Some(Alarm::HomingFailReset),
            7 => Some(Alarm::HomingFailDoor),
            8 => Some(Alarm::HomingFailPulloff),
            9 => Some(Alarm::HomingFailApproach),
            _ => None,
        }
    }

    /// Whether the alarm means machine position can no longer be trusted.
    pub const fn position_lost(self) -> bool {
        matches!(
            self,
            Alarm::HardLimit | Alarm::AbortCycle | Alarm::HomingFailReset
        )
    }
}

impl fmt::Display for Alarm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Alarm::HardLimit => "hard limit triggered",
            Alarm::SoftLimit => "soft limit exceeded",
            Alarm::AbortCycle => "reset while in motion",
            Alarm::ProbeFailInitial => "probe triggered before cycle start",
            Alarm::ProbeFailContact => "probe failed to contact",
            Alarm::HomingFailReset => "homing reset",
            Alarm::HomingFailDoor => "safety door opened during homing",
            Alarm::HomingFailPulloff => "homing pull-off failed",
            Alarm::HomingFailApproach => "homing switch not found",
        };
        write!(f, "ALARM:{} ({})", self.code(), text)
    }
}
