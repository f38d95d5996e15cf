//! Homing cycle (`$H`).

use embedded_hal::delay::DelayNs;

use crate::axis::AxisMask;
use crate::interface::Machine;
#[cfg(feature = "dual-limit-switches")]
use crate::system::Alarm;
use crate::system::MachineState;

use super::MotionControl;

/// Result of a homing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingOutcome {
    /// All requested axes homed; positions synchronized.
    Homed,
    /// Abort observed; the homing alarm (if any) stays latched.
    Aborted,
    /// Limit switches already engaged; machine reset and hard limit alarm
    /// raised without moving.
    LimitsEngaged,
}

impl<'a, M, D> MotionControl<'a, M, D>
where
    M: Machine,
    D: DelayNs,
{
    /// Run the homing cycle.
    ///
    /// An empty `axes` mask runs the configured cycle groups in order. With
    /// the `homing-single-axis` feature a non-empty mask homes only those
    /// axes. The caller must ensure the machine is idle with an empty planner.
    pub fn homing_cycle(&mut self, axes: AxisMask) -> HomingOutcome {
        info!("homing cycle start");
        self.sys.set_state(MachineState::Homing);

        #[cfg(feature = "dual-limit-switches")]
        {
            // One input for both ends of travel: cannot tell which side is engaged
            let engaged = self.machine.triggered();
            if !engaged.is_empty() {
                warn!("homing refused: limits engaged {=u8:b}", engaged.bits());
                // Homing state makes the reset kill the steppers
                self.reset();
                self.sys.raise_alarm(Alarm::HardLimit);
                return HomingOutcome::LimitsEngaged;
            }
        }

        self.machine.disable_hard_limits();

        #[cfg(feature = "homing-single-axis")]
        let single = !axes.is_empty();
        #[cfg(not(feature = "homing-single-axis"))]
        let single = {
            let _ = axes;
            false
        };

        if single {
            self.machine.go_home(self.sys, axes);
        } else {
            let config = self.config;
            for &group in config.homing.cycles.iter() {
                if self.sys.is_aborted() {
                    break;
                }
                self.machine.go_home(self.sys, group);
            }
        }

        if self.checkpoint() {
            info!("homing aborted");
            return HomingOutcome::Aborted;
        }

        self.machine.sync_parser_position(self.sys);
        self.machine.sync_position(self.sys);

        if self.config.limits.hard_limits {
            self.machine.enable_hard_limits();
        }

        self.sys.set_state(MachineState::Idle);
        info!("homing cycle complete");
        HomingOutcome::Homed
    }
}
