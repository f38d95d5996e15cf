//! Parking motion and parking override control.

use embedded_hal::delay::DelayNs;

use crate::axis::MotionTarget;
use crate::interface::{Machine, PlanStatus};
use crate::system::{OverrideControl, StepControl};

use super::{LineRequest, MotionControl};

impl<'a, M, D> MotionControl<'a, M, D>
where
    M: Machine,
    D: DelayNs,
{
    /// Execute a parking move outside the planner ring buffer.
    ///
    /// Blocks, servicing system commands, until the step executor clears
    /// `EXECUTE_SYS_MOTION` or abort is set. Refused while abort is set.
    pub fn parking_motion(&mut self, target: &MotionTarget, line: &LineRequest) {
        if self.sys.is_aborted() {
            return;
        }

        match self.machine.buffer_parking_line(target, line) {
            PlanStatus::Queued => {
                debug!("parking motion start");
                self.sys.set_step_control(StepControl::EXECUTE_SYS_MOTION);
                // Allow the move to run while a feed hold is in effect
                self.sys.clear_step_control(StepControl::END_MOTION);
                self.machine.enter_parking();
                self.machine.prepare_buffer();
                self.machine.wake_up();

                loop {
                    self.machine.exec_rt_system(self.sys);
                    if self.sys.is_aborted() {
                        return;
                    }
                    if !self
                        .sys
                        .step_control()
                        .contains(StepControl::EXECUTE_SYS_MOTION)
                    {
                        break;
                    }
                }

                self.machine.exit_parking();
                debug!("parking motion complete");
            }
            PlanStatus::Empty => {
                self.sys.clear_step_control(StepControl::EXECUTE_SYS_MOTION);
                self.machine.exec_rt_system(self.sys);
            }
        }
    }

    /// Change the parking override once every queued motion has completed.
    pub fn override_ctrl_update(&mut self, value: OverrideControl) {
        if self.buffer_synchronize() {
            return;
        }
        self.sys.set_override_ctrl(value);
    }
}
