//! Per-motion request data passed to the planner.

use crate::interface::SpindleState;
use crate::system::Condition;

/// Feed, spindle and condition flags accompanying a motion target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineRequest {
    /// Feed rate in mm/min, or the inverse time in 1/min when
    /// [`Condition::INVERSE_TIME`] is set.
    pub feed_rate: f32,
    /// Spindle speed in RPM (laser power in laser mode).
    pub spindle_speed: f32,
    /// Condition flags.
    pub condition: Condition,
}

impl LineRequest {
    /// Feed move at `feed_rate` mm/min.
    pub fn feed(feed_rate: f32) -> Self {
        Self {
            feed_rate,
            ..Default::default()
        }
    }

    /// Rapid (seek) move.
    pub fn rapid() -> Self {
        Self {
            condition: Condition::RAPID_MOTION,
            ..Default::default()
        }
    }

    /// Add condition flags.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition |= condition;
        self
    }

    /// Set the spindle direction and speed.
    pub fn with_spindle(mut self, state: SpindleState, rpm: f32) -> Self {
        self.condition
            .remove(Condition::SPINDLE_CW | Condition::SPINDLE_CCW);
        match state {
            SpindleState::Cw => self.condition |= Condition::SPINDLE_CW,
            SpindleState::Ccw => self.condition |= Condition::SPINDLE_CCW,
            SpindleState::Off => {}
        }
        self.spindle_speed = rpm;
        self
    }

    /// Feed rate is an inverse time.
    #[inline]
    pub fn is_inverse_time(&self) -> bool {
        self.condition.contains(Condition::INVERSE_TIME)
    }

    /// Spindle state encoded in the condition flags.
    pub fn spindle_state(&self) -> SpindleState {
        if self.condition.contains(Condition::SPINDLE_CW) {
            SpindleState::Cw
        } else if self.condition.contains(Condition::SPINDLE_CCW) {
            SpindleState::Ccw
        } else {
            SpindleState::Off
        }
    }
}
