//! Bitflag sets shared between the foreground and realtime contexts.

use bitflags::bitflags;

bitflags! {
    /// Pending realtime commands.
    ///
    /// Set asynchronously (serial receive, pin interrupts, the reset
    /// coordinator) and consumed by the realtime protocol.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ExecState: u8 {
        /// Status report requested.
        const STATUS_REPORT = 1 << 0;
        /// Start or resume the cycle.
        const CYCLE_START   = 1 << 1;
        /// Cycle finished; executor went idle.
        const CYCLE_STOP    = 1 << 2;
        /// Decelerate to a controlled stop.
        const FEED_HOLD     = 1 << 3;
        /// Full system reset requested.
        const RESET         = 1 << 4;
        /// Safety door opened.
        const SAFETY_DOOR   = 1 << 5;
        /// Cancel the current motion (probe trigger, jog cancel).
        const MOTION_CANCEL = 1 << 6;
        /// Enter sleep.
        const SLEEP         = 1 << 7;
    }
}

impl Default for ExecState {
    fn default() -> Self {
        Self::empty()
    }
}

bitflags! {
    /// Step executor control flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StepControl: u8 {
        /// Executor should stop at the end of the current motion.
        const END_MOTION         = 1 << 0;
        /// A feed hold is being executed.
        const EXECUTE_HOLD       = 1 << 1;
        /// A system motion (parking) is executing outside the planner ring.
        const EXECUTE_SYS_MOTION = 1 << 2;
        /// Spindle PWM must be refreshed by the executor.
        const UPDATE_SPINDLE_PWM = 1 << 3;
    }
}

impl Default for StepControl {
    fn default() -> Self {
        Self::empty()
    }
}

bitflags! {
    /// Condition flags carried by a line request.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Condition: u8 {
        /// Rapid (G0) motion.
        const RAPID_MOTION     = 1 << 0;
        /// System motion (homing pull-off, parking).
        const SYSTEM_MOTION    = 1 << 1;
        /// Feed overrides do not apply.
        const NO_FEED_OVERRIDE = 1 << 2;
        /// Feed rate is inverse time (1/minutes for the whole move).
        const INVERSE_TIME     = 1 << 3;
        /// Spindle on, clockwise.
        const SPINDLE_CW       = 1 << 4;
        /// Spindle on, counter-clockwise.
        const SPINDLE_CCW      = 1 << 5;
        /// Flood coolant on.
        const COOLANT_FLOOD    = 1 << 6;
        /// Mist coolant on.
        const COOLANT_MIST     = 1 << 7;
    }
}

impl Default for Condition {
    fn default() -> Self {
        Self::empty()
    }
}
