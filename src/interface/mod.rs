//! Collaborator interfaces.
//!
//! The motion controllers never touch hardware or the planner directly. Each
//! collaborator is a trait implemented by the firmware (or a simulator in
//! tests); [`Machine`] bundles them so a controller can be generic over a
//! single type parameter.

mod probe_pin;

pub use probe_pin::PinProbe;

use crate::axis::{AxisMask, MotionTarget};
use crate::motion::LineRequest;
use crate::system::SystemState;

/// Result of handing a motion to the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlanStatus {
    /// A block was queued.
    Queued,
    /// Zero-length motion, nothing queued.
    Empty,
}

/// Probe approach direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProbeDirection {
    /// Move until the probe makes contact.
    #[default]
    Toward,
    /// Move until the probe breaks contact.
    Away,
}

/// Spindle output state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpindleState {
    /// Spindle stopped.
    Off,
    /// Clockwise (M3).
    Cw,
    /// Counter-clockwise (M4).
    Ccw,
}

/// Motion planner ring buffer.
pub trait Planner {
    /// Queue a line to `target`. Returns [`PlanStatus::Empty`] for a
    /// zero-length move.
    fn buffer_line(&mut self, target: &MotionTarget, line: &LineRequest) -> PlanStatus;

    /// Plan a parking move into the dedicated system-motion slot, bypassing
    /// the ring buffer.
    fn buffer_parking_line(&mut self, target: &MotionTarget, line: &LineRequest) -> PlanStatus;

    /// No free block available.
    fn is_full(&self) -> bool;

    /// At least one block is queued or executing.
    fn has_pending_block(&self) -> bool;

    /// Discard every queued block.
    fn clear(&mut self);

    /// Resynchronize the planner position with the machine position.
    fn sync_position(&mut self, sys: &SystemState);
}

/// Step generator.
pub trait Stepper {
    /// Reset the step generator and discard its segment buffer.
    fn reset(&mut self);

    /// Fill the segment buffer from the planner.
    fn prepare_buffer(&mut self);

    /// Enable the drivers and start the step timer.
    fn wake_up(&mut self);

    /// Stop the step timer immediately.
    fn go_idle(&mut self);

    /// Save the in-progress segment state before a parking move.
    fn enter_parking(&mut self);

    /// Restore the saved segment state after a parking move.
    fn exit_parking(&mut self);
}

/// Limit switches and the homing sequence.
pub trait Limits {
    /// Axes whose limit switch is currently engaged.
    fn triggered(&self) -> AxisMask;

    /// Disable hard limit interrupts (during homing).
    fn disable_hard_limits(&mut self);

    /// Re-enable hard limit interrupts and clear any pending trigger.
    fn enable_hard_limits(&mut self);

    /// Run the homing search for the given axes. Failures are reported by
    /// raising an alarm and abort in `sys`.
    fn go_home(&mut self, sys: &SystemState, axes: AxisMask);
}

/// Probe input.
pub trait Probe {
    /// Set the polarity for the next probe cycle.
    fn configure(&mut self, direction: ProbeDirection);

    /// Probe reads as triggered under the configured polarity.
    fn is_triggered(&mut self) -> bool;
}

/// Spindle output.
pub trait Spindle {
    /// Stop the spindle.
    fn stop_spindle(&mut self);

    /// Apply a spindle state and speed immediately.
    fn sync_spindle(&mut self, state: SpindleState, rpm: f32);
}

/// Coolant output.
pub trait Coolant {
    /// Stop all coolant outputs.
    fn stop_coolant(&mut self);
}

/// Realtime command servicing.
pub trait Protocol {
    /// Service every pending realtime command (status, hold, cycle start,
    /// reset, overrides, alarms).
    fn execute_realtime(&mut self, sys: &SystemState);

    /// Service system-level commands only.
    fn exec_rt_system(&mut self, sys: &SystemState);
}

/// G-code parser position.
pub trait ParserSync {
    /// Copy the machine position into the parser's working position.
    fn sync_parser_position(&mut self, sys: &SystemState);
}

/// Every collaborator a motion controller needs.
pub trait Machine:
    Planner + Stepper + Limits + Probe + Spindle + Coolant + Protocol + ParserSync
{
}

impl<T> Machine for T where
    T: Planner + Stepper + Limits + Probe + Spindle + Coolant + Protocol + ParserSync
{
}
