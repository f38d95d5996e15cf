//! Process-wide machine state shared with the realtime context.
//!
//! Every field is an independent atomic. Interrupt handlers may raise abort,
//! alarms and pending commands at any time; the foreground only clears them
//! through the explicit `acknowledge_*` operations. No field is guarded by a
//! lock, so each is safe to touch from interrupt level.

use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

use crate::axis::{Axis, MotionTarget, N_AXIS};

use super::alarm::Alarm;
use super::flags::{ExecState, StepControl};

/// Machine operating state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MachineState {
    /// Ready, no motion.
    Idle = 0,
    /// Executing queued motion.
    Cycle = 1,
    /// Feed hold active or completed.
    Hold = 2,
    /// Homing cycle in progress.
    Homing = 3,
    /// Jogging.
    Jog = 4,
    /// G-code check mode: commands validated, no motion.
    CheckMode = 5,
    /// Alarm latched; motion locked out.
    Alarm = 6,
}

impl MachineState {
    const fn from_u8(value: u8) -> Self {
        match value {
            1 => MachineState::Cycle,
            2 => MachineState::Hold,
            3 => MachineState::Homing,
            4 => MachineState::Jog,
            5 => MachineState::CheckMode,
            6 => MachineState::Alarm,
            _ => MachineState::Idle,
        }
    }

    /// Cycle, homing and jog: the steppers are (or may be) moving.
    #[inline]
    pub const fn is_motion(self) -> bool {
        matches!(self, MachineState::Cycle | MachineState::Homing | MachineState::Jog)
    }
}

/// Probe monitor observed by the step executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ProbeMonitor {
    /// Probe input ignored.
    Off = 0,
    /// Executor checks the probe input every step and stops on contact.
    Active = 1,
}

/// Override control value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OverrideControl {
    /// Normal operation.
    Normal = 0,
    /// Parking motion disabled for the program (M56 P0).
    ParkingMotionDisabled = 1,
}

#[allow(clippy::declare_interior_mutable_const)]
const ZERO_POSITION: AtomicU32 = AtomicU32::new(0);

/// Shared machine state. One instance per process, usually a `static`.
///
/// ```rust
/// use cnc_motion::system::{MachineState, SystemState};
///
/// static SYS: SystemState = SystemState::new();
///
/// assert_eq!(SYS.state(), MachineState::Idle);
/// ```
#[derive(Debug)]
pub struct SystemState {
    state: AtomicU8,
    abort: AtomicBool,
    exec_state: AtomicU8,
    exec_alarm: AtomicU8,
    step_control: AtomicU8,
    probe_monitor: AtomicU8,
    probe_succeeded: AtomicBool,
    /// f32 bit patterns, written by the executor.
    position: [AtomicU32; N_AXIS],
    /// f32 bit patterns, latched on probe contact.
    probe_position: [AtomicU32; N_AXIS],
    override_ctrl: AtomicU8,
}

impl Default for SystemState {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemState {
    /// Create a state block in `Idle` with all flags clear.
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(MachineState::Idle as u8),
            abort: AtomicBool::new(false),
            exec_state: AtomicU8::new(0),
            exec_alarm: AtomicU8::new(0),
            step_control: AtomicU8::new(0),
            probe_monitor: AtomicU8::new(ProbeMonitor::Off as u8),
            probe_succeeded: AtomicBool::new(false),
            position: [ZERO_POSITION; N_AXIS],
            probe_position: [ZERO_POSITION; N_AXIS],
            override_ctrl: AtomicU8::new(OverrideControl::Normal as u8),
        }
    }

    // -- machine state ---------------------------------------------------

    /// Current machine state.
    #[inline]
    pub fn state(&self) -> MachineState {
        MachineState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Set the machine state.
    #[inline]
    pub fn set_state(&self, state: MachineState) {
        self.state.store(state as u8, Ordering::Release);
    }

    // -- abort -----------------------------------------------------------

    /// Whether a system abort is in progress.
    #[inline]
    pub fn is_aborted(&self) -> bool {
        self.abort.load(Ordering::Acquire)
    }

    /// Raise the system abort. Every foreground loop unwinds at its next
    /// checkpoint.
    #[inline]
    pub fn set_abort(&self) {
        self.abort.store(true, Ordering::Release);
    }

    // -- pending realtime commands ---------------------------------------

    /// Pending realtime commands.
    #[inline]
    pub fn exec_state(&self) -> ExecState {
        ExecState::from_bits_truncate(self.exec_state.load(Ordering::Acquire))
    }

    /// Set pending realtime command flags. Returns the flags that were
    /// pending before the call.
    #[inline]
    pub fn set_exec_state(&self, flags: ExecState) -> ExecState {
        ExecState::from_bits_truncate(self.exec_state.fetch_or(flags.bits(), Ordering::AcqRel))
    }

    /// Clear pending realtime command flags.
    #[inline]
    pub fn clear_exec_state(&self, flags: ExecState) {
        self.exec_state.fetch_and(!flags.bits(), Ordering::AcqRel);
    }

    // -- alarm -----------------------------------------------------------

    /// Latched alarm, if any.
    #[inline]
    pub fn alarm(&self) -> Option<Alarm> {
        Alarm::from_code(self.exec_alarm.load(Ordering::Acquire))
    }

    /// Latch an alarm, replacing any previous one. The realtime protocol
    /// moves the machine into [`MachineState::Alarm`] when it observes it.
    #[inline]
    pub fn raise_alarm(&self, alarm: Alarm) {
        self.exec_alarm.store(alarm.code(), Ordering::Release);
    }

    /// Latch an alarm only if none is pending. Returns whether it was set.
    #[inline]
    pub fn raise_alarm_if_clear(&self, alarm: Alarm) -> bool {
        self.exec_alarm
            .compare_exchange(0, alarm.code(), Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    // -- step control ----------------------------------------------------

    /// Step executor control flags.
    #[inline]
    pub fn step_control(&self) -> StepControl {
        StepControl::from_bits_truncate(self.step_control.load(Ordering::Acquire))
    }

    /// Set step control flags.
    #[inline]
    pub fn set_step_control(&self, flags: StepControl) {
        self.step_control.fetch_or(flags.bits(), Ordering::AcqRel);
    }

    /// Clear step control flags.
    #[inline]
    pub fn clear_step_control(&self, flags: StepControl) {
        self.step_control.fetch_and(!flags.bits(), Ordering::AcqRel);
    }

    // -- probing ---------------------------------------------------------

    /// Probe monitor state.
    #[inline]
    pub fn probe_monitor(&self) -> ProbeMonitor {
        match self.probe_monitor.load(Ordering::Acquire) {
            0 => ProbeMonitor::Off,
            _ => ProbeMonitor::Active,
        }
    }

    /// Arm or disarm the probe monitor.
    #[inline]
    pub fn set_probe_monitor(&self, monitor: ProbeMonitor) {
        self.probe_monitor.store(monitor as u8, Ordering::Release);
    }

    /// Whether the last probe cycle made contact.
    #[inline]
    pub fn probe_succeeded(&self) -> bool {
        self.probe_succeeded.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn set_probe_succeeded(&self, succeeded: bool) {
        self.probe_succeeded.store(succeeded, Ordering::Release);
    }

    /// Executor hook, called on probe contact while stepping.
    ///
    /// When the monitor is armed, latches the machine position as the probe
    /// position, disarms the monitor and requests a motion cancel. Returns
    /// whether a contact was recorded.
    pub fn probe_state_monitor(&self) -> bool {
        if self.probe_monitor() != ProbeMonitor::Active {
            return false;
        }
        self.latch_probe_position();
        self.set_probe_monitor(ProbeMonitor::Off);
        self.set_exec_state(ExecState::MOTION_CANCEL);
        true
    }

    /// Position recorded by the last probe cycle.
    pub fn probe_position(&self) -> MotionTarget {
        load_vector(&self.probe_position)
    }

    pub(crate) fn latch_probe_position(&self) {
        for (dst, src) in self.probe_position.iter().zip(self.position.iter()) {
            dst.store(src.load(Ordering::Acquire), Ordering::Release);
        }
    }

    // -- machine position ------------------------------------------------

    /// Current machine position as reported by the executor.
    pub fn machine_position(&self) -> MotionTarget {
        load_vector(&self.position)
    }

    /// Overwrite the machine position (executor, homing).
    pub fn set_machine_position(&self, position: &MotionTarget) {
        for (dst, value) in self.position.iter().zip(position.iter()) {
            dst.store(value.to_bits(), Ordering::Release);
        }
    }

    /// Overwrite a single axis of the machine position.
    pub fn set_axis_position(&self, axis: Axis, value: f32) {
        self.position[axis.index()].store(value.to_bits(), Ordering::Release);
    }

    // -- overrides -------------------------------------------------------

    /// Override control value.
    #[inline]
    pub fn override_ctrl(&self) -> OverrideControl {
        match self.override_ctrl.load(Ordering::Acquire) {
            0 => OverrideControl::Normal,
            _ => OverrideControl::ParkingMotionDisabled,
        }
    }

    #[cfg_attr(not(feature = "parking"), allow(dead_code))]
    #[inline]
    pub(crate) fn set_override_ctrl(&self, value: OverrideControl) {
        self.override_ctrl.store(value as u8, Ordering::Release);
    }

    // -- acknowledgement -------------------------------------------------

    /// Foreground acknowledgement of a completed reset.
    ///
    /// Clears abort, pending commands, step control and the probe monitor.
    /// The machine comes back in `Alarm` when an alarm is latched (position
    /// can no longer be trusted), otherwise in `Idle`.
    pub fn acknowledge_reset(&self) {
        self.exec_state.store(0, Ordering::Release);
        self.step_control.store(0, Ordering::Release);
        self.set_probe_monitor(ProbeMonitor::Off);
        let next = if self.alarm().is_some() || self.state() == MachineState::Alarm {
            MachineState::Alarm
        } else {
            MachineState::Idle
        };
        self.set_state(next);
        self.abort.store(false, Ordering::Release);
    }

    /// Unlock after an alarm: clears the latched alarm and returns to `Idle`.
    pub fn acknowledge_alarm(&self) {
        self.exec_alarm.store(0, Ordering::Release);
        if self.state() == MachineState::Alarm {
            self.set_state(MachineState::Idle);
        }
    }
}

fn load_vector(cells: &[AtomicU32; N_AXIS]) -> MotionTarget {
    let mut out = [0.0; N_AXIS];
    for (dst, cell) in out.iter_mut().zip(cells.iter()) {
        *dst = f32::from_bits(cell.load(Ordering::Acquire));
    }
    out
}
