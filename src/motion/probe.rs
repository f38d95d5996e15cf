//! Probe cycle (G38.x).

use embedded_hal::delay::DelayNs;

use crate::axis::MotionTarget;
use crate::error::Result;
use crate::interface::{Machine, ProbeDirection};
use crate::system::{Alarm, ExecState, MachineState, ProbeMonitor};

use super::{LineRequest, MotionControl};

/// Probe cycle variant flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProbeFlags {
    /// Probe away from the workpiece (G38.4/G38.5): stop on loss of contact.
    pub away: bool,
    /// Do not raise an alarm when the probe fails to trigger (G38.3/G38.5).
    pub no_error: bool,
}

impl ProbeFlags {
    /// Approach direction encoded by the flags.
    #[inline]
    pub fn direction(&self) -> ProbeDirection {
        if self.away {
            ProbeDirection::Away
        } else {
            ProbeDirection::Toward
        }
    }
}

/// Result of a probe cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProbeOutcome {
    /// Check mode: nothing executed.
    CheckModeNoop,
    /// Abort observed; the cycle did not complete.
    Aborted,
    /// Probe was already triggered before moving. Alarm raised.
    FailedInitialState,
    /// Contact made; the trigger position is latched in the system state.
    Found,
    /// Travel completed without contact.
    FailedToTrigger,
}

impl<'a, M, D> MotionControl<'a, M, D>
where
    M: Machine,
    D: DelayNs,
{
    /// Probe toward (or away from) `target`.
    ///
    /// Drains the planner, checks the probe, queues the move and arms the
    /// executor's probe monitor until the machine returns to idle. The rest
    /// of the probe move is always discarded and the planner resynchronized
    /// to the machine position. On contact the trigger position is available
    /// from [`SystemState::probe_position`](crate::system::SystemState::probe_position).
    ///
    /// # Errors
    ///
    /// Propagates gateway errors from queueing the probe move.
    pub fn probe_cycle(
        &mut self,
        target: &MotionTarget,
        line: &LineRequest,
        flags: ProbeFlags,
    ) -> Result<ProbeOutcome> {
        if self.sys.state() == MachineState::CheckMode {
            return Ok(ProbeOutcome::CheckModeNoop);
        }

        if self.buffer_synchronize() {
            return Ok(ProbeOutcome::Aborted);
        }

        self.sys.set_probe_succeeded(false);
        self.machine.configure(flags.direction());

        if self.machine.is_triggered() {
            warn!("probe triggered before cycle start");
            self.sys.raise_alarm(Alarm::ProbeFailInitial);
            self.checkpoint();
            self.machine.configure(ProbeDirection::Toward);
            return Ok(ProbeOutcome::FailedInitialState);
        }

        if let Err(e) = self.line(target, line) {
            self.machine.configure(ProbeDirection::Toward);
            return Err(e);
        }

        self.sys.set_probe_monitor(ProbeMonitor::Active);
        self.sys.set_exec_state(ExecState::CYCLE_START);

        loop {
            if self.checkpoint() {
                return Ok(ProbeOutcome::Aborted);
            }
            if self.sys.state() == MachineState::Idle {
                break;
            }
        }

        // The executor disarms the monitor when it latches a contact
        let outcome = if self.sys.probe_monitor() == ProbeMonitor::Active {
            if flags.no_error {
                self.sys.latch_probe_position();
            } else {
                error!("probe cycle: no contact, alarm raised");
                self.sys.raise_alarm(Alarm::ProbeFailContact);
            }
            ProbeOutcome::FailedToTrigger
        } else {
            self.sys.set_probe_succeeded(true);
            ProbeOutcome::Found
        };

        self.sys.set_probe_monitor(ProbeMonitor::Off);
        self.machine.configure(ProbeDirection::Toward);
        self.checkpoint();

        // Drop the remainder of the probe move
        self.machine.reset();
        self.machine.clear();
        self.machine.sync_position(self.sys);

        let position = self.sys.probe_position();
        info!(
            "probe cycle: {} at [{}, {}, {}]",
            outcome,
            position[0],
            position[1],
            position[2]
        );
        Ok(outcome)
    }
}
