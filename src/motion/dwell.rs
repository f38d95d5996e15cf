//! Dwell (G4) and timed waits.

use embedded_hal::delay::DelayNs;
use libm::ceilf;

use crate::interface::Machine;
use crate::system::MachineState;

use super::MotionControl;

/// Dwell time slice in milliseconds. Realtime commands are serviced between
/// slices.
pub const DWELL_TIME_STEP_MS: u32 = 50;

/// Reason for a timed wait. Selects what is serviced between slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DelayMode {
    /// Program dwell: full realtime servicing, motion keeps executing.
    Dwell,
    /// Wait inside a suspend (door, parking restore): system commands only.
    SysSuspend,
}

impl<'a, M, D> MotionControl<'a, M, D>
where
    M: Machine,
    D: DelayNs,
{
    /// Pause for `seconds` after every queued motion has completed.
    ///
    /// No-op in check mode. Abort ends the dwell early.
    pub fn dwell(&mut self, seconds: f32) {
        if self.sys.state() == MachineState::CheckMode {
            return;
        }
        if self.buffer_synchronize() {
            return;
        }
        self.delay_sec(seconds, DelayMode::Dwell);
    }

    /// Wait `seconds` in [`DWELL_TIME_STEP_MS`] slices, each preceded by the
    /// servicing `mode` calls for. Returns `true` if abort cut the wait short.
    pub fn delay_sec(&mut self, seconds: f32, mode: DelayMode) -> bool {
        // Saturating cast; negative and NaN durations give no slices
        let slices = ceilf(seconds * 1000.0 / DWELL_TIME_STEP_MS as f32) as u32;
        debug!("delay: {} slices ({})", slices, mode);

        for _ in 0..slices {
            let aborted = match mode {
                DelayMode::Dwell => self.checkpoint(),
                DelayMode::SysSuspend => {
                    self.machine.exec_rt_system(self.sys);
                    self.sys.is_aborted()
                }
            };
            if aborted {
                return true;
            }
            self.delay.delay_ms(DWELL_TIME_STEP_MS);
        }
        false
    }
}
