//! Reset/abort coordinator.

use crate::interface::{Coolant, Spindle, Stepper};
use crate::system::{Alarm, ExecState, MachineState, StepControl, SystemState};

/// Emergency stop. Safe to call from interrupt context.
///
/// Flags a pending reset, stops spindle and coolant and, if steppers may be
/// moving, latches an alarm and forces the step generator idle. Does nothing
/// if a reset is already pending; the pending flag is only cleared by
/// [`SystemState::acknowledge_reset`].
///
/// Only the spindle, coolant and stepper handles are needed, so interrupt
/// handlers can call this without owning the whole machine.
pub fn reset<A>(sys: &SystemState, io: &mut A)
where
    A: Spindle + Coolant + Stepper + ?Sized,
{
    let previous = sys.set_exec_state(ExecState::RESET);
    if previous.contains(ExecState::RESET) {
        return;
    }

    io.stop_spindle();
    io.stop_coolant();

    let state = sys.state();
    let holding = sys
        .step_control()
        .intersects(StepControl::EXECUTE_HOLD | StepControl::EXECUTE_SYS_MOTION);

    if state.is_motion() || holding {
        if state == MachineState::Homing {
            // Keep a more specific homing alarm raised by the limits module
            sys.raise_alarm_if_clear(Alarm::HomingFailReset);
        } else {
            sys.raise_alarm(Alarm::AbortCycle);
        }
        warn!("reset during motion, steppers killed (alarm {})", sys.alarm());
        io.go_idle();
    }
}
