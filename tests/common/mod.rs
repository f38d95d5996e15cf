//! Deterministic machine simulator shared by the integration tests.
//!
//! `Sim` implements every collaborator trait. Each realtime checkpoint
//! advances the simulated executor by one sub-step, so foreground loops make
//! progress exactly as they would against real hardware.

#![allow(dead_code)]

use std::collections::VecDeque;

use cnc_motion::axis::{AxisMask, MotionTarget};
use cnc_motion::interface::{
    Coolant, Limits, ParserSync, PlanStatus, Planner, Probe, ProbeDirection, Protocol, Spindle,
    SpindleState, Stepper,
};
use cnc_motion::motion::{self, LineRequest};
use cnc_motion::system::{Alarm, ExecState, MachineState, ProbeMonitor, StepControl, SystemState};
use embedded_hal::delay::DelayNs;

/// Executor sub-steps per planner block.
pub const SUBSTEPS: u32 = 10;

/// Simulated planner, executor and I/O.
#[derive(Debug)]
pub struct Sim {
    // Planner
    pub queue: VecDeque<MotionTarget>,
    pub capacity: usize,
    pub planned: MotionTarget,
    pub submitted: Vec<(MotionTarget, LineRequest)>,
    pub planner_clears: u32,
    pub planner_syncs: u32,

    // Executor
    pub position: MotionTarget,
    block_start: MotionTarget,
    progress: u32,
    pub stepper_resets: u32,
    pub go_idles: u32,

    // Parking
    pub parking_empty: bool,
    pub stall_parking: bool,
    pending_parking: Option<MotionTarget>,
    pub parking_moves: Vec<MotionTarget>,
    pub parking_enters: u32,
    pub parking_exits: u32,

    // Probe: contact while z is at or below the surface
    pub surface_z: Option<f32>,
    probe_away: bool,
    pub probe_configs: Vec<ProbeDirection>,

    // Limits and homing
    pub limits_engaged: AxisMask,
    pub hard_limits_enabled: bool,
    pub hard_limit_enables: u32,
    pub homed: Vec<AxisMask>,
    pub homing_failure: Option<Alarm>,

    // Outputs
    pub spindle_stops: u32,
    pub coolant_stops: u32,
    pub spindle_syncs: Vec<(SpindleState, f32)>,
    pub parser_syncs: u32,

    // Realtime servicing
    pub realtime_calls: u32,
    pub rt_system_calls: u32,
    pub reset_after_submissions: Option<usize>,
    pub reset_after_checkpoints: Option<u32>,
}

impl Default for Sim {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            capacity: 16,
            planned: [0.0; 3],
            submitted: Vec::new(),
            planner_clears: 0,
            planner_syncs: 0,
            position: [0.0; 3],
            block_start: [0.0; 3],
            progress: 0,
            stepper_resets: 0,
            go_idles: 0,
            parking_empty: false,
            stall_parking: false,
            pending_parking: None,
            parking_moves: Vec::new(),
            parking_enters: 0,
            parking_exits: 0,
            surface_z: None,
            probe_away: false,
            probe_configs: Vec::new(),
            limits_engaged: AxisMask::empty(),
            hard_limits_enabled: true,
            hard_limit_enables: 0,
            homed: Vec::new(),
            homing_failure: None,
            spindle_stops: 0,
            coolant_stops: 0,
            spindle_syncs: Vec::new(),
            parser_syncs: 0,
            realtime_calls: 0,
            rt_system_calls: 0,
            reset_after_submissions: None,
            reset_after_checkpoints: None,
        }
    }
}

impl Sim {
    pub fn new() -> Self {
        Self::default()
    }

    /// Targets of every queued block, in order.
    pub fn targets(&self) -> Vec<MotionTarget> {
        self.submitted.iter().map(|(t, _)| *t).collect()
    }

    fn contact(&self) -> bool {
        self.surface_z.map_or(false, |z| self.position[2] <= z)
    }

    fn move_to(&mut self, sys: &SystemState, position: MotionTarget) {
        self.position = position;
        sys.set_machine_position(&position);
    }

    /// Reset, alarm and parking handling shared by both protocol entries.
    fn service_system(&mut self, sys: &SystemState) {
        let checkpoints = self.realtime_calls + self.rt_system_calls;
        if self.reset_after_checkpoints.map_or(false, |n| checkpoints >= n) {
            self.reset_after_checkpoints = None;
            motion::reset(sys, self);
        }
        if let Some(n) = self.reset_after_submissions {
            if self.submitted.len() >= n {
                self.reset_after_submissions = None;
                motion::reset(sys, self);
            }
        }

        if sys.alarm().is_some() && sys.state() != MachineState::Alarm {
            sys.set_state(MachineState::Alarm);
        }
        if sys.exec_state().contains(ExecState::RESET) {
            sys.set_abort();
            return;
        }

        if sys.step_control().contains(StepControl::EXECUTE_SYS_MOTION) && !self.stall_parking {
            if let Some(target) = self.pending_parking.take() {
                self.move_to(sys, target);
                self.parking_moves.push(target);
                sys.clear_step_control(StepControl::EXECUTE_SYS_MOTION);
            }
        }
    }

    fn step(&mut self, sys: &SystemState) {
        let Some(&target) = self.queue.front() else {
            sys.set_state(MachineState::Idle);
            return;
        };

        self.progress += 1;
        let position = if self.progress >= SUBSTEPS {
            target
        } else {
            let frac = self.progress as f32 / SUBSTEPS as f32;
            let mut p = self.block_start;
            for (i, v) in p.iter_mut().enumerate() {
                *v += (target[i] - *v) * frac;
            }
            p
        };
        self.move_to(sys, position);

        if sys.probe_monitor() == ProbeMonitor::Active && (self.contact() != self.probe_away) {
            sys.probe_state_monitor();
            // Motion cancel: discard the rest of the probe move
            sys.clear_exec_state(ExecState::MOTION_CANCEL);
            self.queue.clear();
            self.progress = 0;
            sys.set_state(MachineState::Idle);
            return;
        }

        if self.progress >= SUBSTEPS {
            self.queue.pop_front();
            self.progress = 0;
            self.block_start = target;
            if self.queue.is_empty() {
                sys.set_state(MachineState::Idle);
            }
        }
    }
}

impl Planner for Sim {
    fn buffer_line(&mut self, target: &MotionTarget, line: &LineRequest) -> PlanStatus {
        if *target == self.planned {
            return PlanStatus::Empty;
        }
        self.queue.push_back(*target);
        self.planned = *target;
        self.submitted.push((*target, *line));
        PlanStatus::Queued
    }

    fn buffer_parking_line(&mut self, target: &MotionTarget, _line: &LineRequest) -> PlanStatus {
        if self.parking_empty {
            return PlanStatus::Empty;
        }
        self.pending_parking = Some(*target);
        PlanStatus::Queued
    }

    fn is_full(&self) -> bool {
        self.queue.len() >= self.capacity
    }

    fn has_pending_block(&self) -> bool {
        !self.queue.is_empty()
    }

    fn clear(&mut self) {
        self.queue.clear();
        self.progress = 0;
        self.planner_clears += 1;
    }

    fn sync_position(&mut self, sys: &SystemState) {
        self.planned = sys.machine_position();
        self.block_start = self.planned;
        self.planner_syncs += 1;
    }
}

impl Stepper for Sim {
    fn reset(&mut self) {
        self.progress = 0;
        self.stepper_resets += 1;
    }

    fn prepare_buffer(&mut self) {}

    fn wake_up(&mut self) {}

    fn go_idle(&mut self) {
        self.go_idles += 1;
    }

    fn enter_parking(&mut self) {
        self.parking_enters += 1;
    }

    fn exit_parking(&mut self) {
        self.parking_exits += 1;
    }
}

impl Limits for Sim {
    fn triggered(&self) -> AxisMask {
        self.limits_engaged
    }

    fn disable_hard_limits(&mut self) {
        self.hard_limits_enabled = false;
    }

    fn enable_hard_limits(&mut self) {
        self.hard_limits_enabled = true;
        self.hard_limit_enables += 1;
    }

    fn go_home(&mut self, sys: &SystemState, axes: AxisMask) {
        self.homed.push(axes);
        if let Some(alarm) = self.homing_failure {
            sys.raise_alarm(alarm);
            motion::reset(sys, self);
            self.execute_realtime(sys);
            return;
        }
        for axis in axes.axes() {
            self.position[axis.index()] = 0.0;
            sys.set_axis_position(axis, 0.0);
        }
    }
}

impl Probe for Sim {
    fn configure(&mut self, direction: ProbeDirection) {
        self.probe_away = direction == ProbeDirection::Away;
        self.probe_configs.push(direction);
    }

    fn is_triggered(&mut self) -> bool {
        self.contact() != self.probe_away
    }
}

impl Spindle for Sim {
    fn stop_spindle(&mut self) {
        self.spindle_stops += 1;
    }

    fn sync_spindle(&mut self, state: SpindleState, rpm: f32) {
        self.spindle_syncs.push((state, rpm));
    }
}

impl Coolant for Sim {
    fn stop_coolant(&mut self) {
        self.coolant_stops += 1;
    }
}

impl Protocol for Sim {
    fn execute_realtime(&mut self, sys: &SystemState) {
        self.realtime_calls += 1;
        self.service_system(sys);
        if sys.is_aborted() {
            return;
        }

        let exec = sys.exec_state();
        if exec.contains(ExecState::FEED_HOLD) {
            sys.clear_exec_state(ExecState::FEED_HOLD);
            if sys.state() == MachineState::Cycle {
                // Decelerate and stop where we are
                self.queue.clear();
                self.progress = 0;
                self.block_start = self.position;
                self.planned = self.position;
                sys.set_state(MachineState::Idle);
            }
        }
        if exec.contains(ExecState::CYCLE_START) {
            sys.clear_exec_state(ExecState::CYCLE_START);
            if sys.state() == MachineState::Idle && !self.queue.is_empty() {
                self.block_start = self.position;
                sys.set_state(MachineState::Cycle);
            }
        }

        if sys.state() == MachineState::Cycle {
            self.step(sys);
        }
    }

    fn exec_rt_system(&mut self, sys: &SystemState) {
        self.rt_system_calls += 1;
        self.service_system(sys);
    }
}

impl ParserSync for Sim {
    fn sync_parser_position(&mut self, _sys: &SystemState) {
        self.parser_syncs += 1;
    }
}

/// Delay provider recording the requested time.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub total_ns: u64,
    pub ms_calls: u32,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.ms_calls += 1;
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}

pub fn assert_close(a: &MotionTarget, b: &MotionTarget, eps: f32) {
    for i in 0..a.len() {
        assert!(
            (a[i] - b[i]).abs() <= eps,
            "axis {}: {} vs {} (eps {})",
            i,
            a[i],
            b[i],
            eps
        );
    }
}
