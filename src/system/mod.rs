//! Shared system state.
//!
//! The single state block read and written by both the foreground motion
//! controllers and the realtime/interrupt context.

mod alarm;
mod flags;
mod state;

pub use alarm::Alarm;
pub use flags::{Condition, ExecState, StepControl};
pub use state::{MachineState, OverrideControl, ProbeMonitor, SystemState};
