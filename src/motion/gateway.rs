//! Motion gateway: the single admission point for linear motion.

use embedded_hal::delay::DelayNs;

use crate::axis::MotionTarget;
use crate::config::TravelViolation;
use crate::error::{Error, MotionError, Result};
use crate::interface::{Machine, PlanStatus, SpindleState};
use crate::system::{Alarm, Condition, ExecState, MachineState};

use super::{LineRequest, MotionControl};

/// Outcome of an admitted line request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineOutcome {
    /// A block was queued in the planner.
    Queued,
    /// Zero-length move, nothing queued.
    Degenerate,
    /// Check mode: validated but not queued.
    CheckMode,
    /// Abort observed while waiting for buffer space; nothing queued.
    Aborted,
}

impl<'a, M, D> MotionControl<'a, M, D>
where
    M: Machine,
    D: DelayNs,
{
    /// Queue a straight move to `target`.
    ///
    /// Every motion, arc segments included, passes through here. In order:
    /// alarm lock, soft limits (skipped while jogging), check mode, then
    /// backpressure: realtime commands are serviced and abort re-checked until
    /// the planner has room, auto-starting the cycle while it is full.
    ///
    /// # Errors
    ///
    /// - `MotionError::AlarmLocked` while the machine is in the alarm state
    /// - `MotionError::SoftLimit` if the target is outside machine travel.
    ///   The machine is reset and the soft limit alarm latched.
    pub fn line(&mut self, target: &MotionTarget, line: &LineRequest) -> Result<LineOutcome> {
        let state = self.sys.state();
        if state == MachineState::Alarm {
            return Err(Error::Motion(MotionError::AlarmLocked(self.sys.alarm())));
        }

        let config = self.config;
        let limits = &config.limits;
        if limits.soft_limits && state != MachineState::Jog {
            if let Some(violation) = limits.check_travel(target) {
                return Err(self.soft_limit_violation(violation));
            }
        }

        if state == MachineState::CheckMode {
            return Ok(LineOutcome::CheckMode);
        }

        loop {
            if self.checkpoint() {
                return Ok(LineOutcome::Aborted);
            }
            if self.machine.is_full() {
                self.auto_cycle_start();
            } else {
                break;
            }
        }

        match self.machine.buffer_line(target, line) {
            PlanStatus::Queued => Ok(LineOutcome::Queued),
            PlanStatus::Empty => {
                // Laser M3 power must follow a coincident move immediately
                if config.motion.laser_mode && line.condition.contains(Condition::SPINDLE_CW) {
                    self.machine.sync_spindle(SpindleState::Cw, line.spindle_speed);
                }
                Ok(LineOutcome::Degenerate)
            }
        }
    }

    fn soft_limit_violation(&mut self, violation: TravelViolation) -> Error {
        warn!(
            "soft limit: axis {} target {} outside [{}, {}]",
            violation.axis,
            violation.position,
            violation.travel.min,
            violation.travel.max
        );

        let error = Error::Motion(MotionError::SoftLimit {
            axis: violation.axis,
            position: violation.position,
            min: violation.travel.min,
            max: violation.travel.max,
        });

        // Decelerate to a stop before killing the steppers
        if self.sys.state() == MachineState::Cycle {
            self.sys.set_exec_state(ExecState::FEED_HOLD);
            loop {
                if self.checkpoint() {
                    return error;
                }
                if self.sys.state() == MachineState::Idle {
                    break;
                }
            }
        }

        self.reset();
        self.sys.raise_alarm(Alarm::SoftLimit);
        self.checkpoint();
        error
    }
}
