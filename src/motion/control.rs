//! Motion controller: shared plumbing for every motion operation.

use embedded_hal::delay::DelayNs;

use crate::config::SystemConfig;
use crate::interface::Machine;
use crate::system::{ExecState, MachineState, SystemState};

/// Issues every line, arc, dwell, homing, probing and parking motion.
///
/// Generic over:
/// - `M`: the machine collaborators (planner, stepper, limits, probe,
///   spindle, coolant, realtime protocol, parser)
/// - `D`: delay provider used for dwells
///
/// All waits are busy-wait loops with a realtime checkpoint on every
/// iteration. State read before a checkpoint must be re-read after it.
pub struct MotionControl<'a, M, D>
where
    M: Machine,
    D: DelayNs,
{
    pub(super) sys: &'a SystemState,
    pub(super) config: &'a SystemConfig,
    pub(super) machine: M,
    pub(super) delay: D,
}

impl<'a, M, D> MotionControl<'a, M, D>
where
    M: Machine,
    D: DelayNs,
{
    /// Create a controller over validated configuration.
    pub fn new(sys: &'a SystemState, config: &'a SystemConfig, machine: M, delay: D) -> Self {
        Self {
            sys,
            config,
            machine,
            delay,
        }
    }

    /// Shared system state.
    #[inline]
    pub fn sys(&self) -> &'a SystemState {
        self.sys
    }

    /// Active configuration.
    #[inline]
    pub fn config(&self) -> &'a SystemConfig {
        self.config
    }

    /// Machine collaborators.
    #[inline]
    pub fn machine(&self) -> &M {
        &self.machine
    }

    /// Machine collaborators, mutably.
    #[inline]
    pub fn machine_mut(&mut self) -> &mut M {
        &mut self.machine
    }

    /// Release the collaborators and the delay provider.
    pub fn release(self) -> (M, D) {
        (self.machine, self.delay)
    }

    /// Service pending realtime commands. Returns `true` if abort is set.
    #[inline]
    pub fn checkpoint(&mut self) -> bool {
        self.machine.execute_realtime(self.sys);
        self.sys.is_aborted()
    }

    /// Start the cycle if the planner holds a block.
    pub fn auto_cycle_start(&mut self) {
        if self.machine.has_pending_block() {
            self.sys.set_exec_state(ExecState::CYCLE_START);
        }
    }

    /// Block until every queued motion has executed.
    ///
    /// Returns `true` if abort interrupted the wait.
    pub fn buffer_synchronize(&mut self) -> bool {
        self.auto_cycle_start();
        loop {
            if self.checkpoint() {
                return true;
            }
            if !self.machine.has_pending_block() && self.sys.state() != MachineState::Cycle {
                return false;
            }
        }
    }

    /// Emergency stop through the reset coordinator. See [`super::reset()`].
    pub fn reset(&mut self) {
        super::reset::reset(self.sys, &mut self.machine);
    }
}
