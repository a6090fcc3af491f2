//! Engine module for the Pomodoro Timer.
//!
//! This module contains the core timer functionality:
//! - `timer`: State machine with commands, countdown and session switching
//! - `alarm`: Alarm sub-phase between a completed countdown and the next session
//! - `driver`: Tokio task that owns the clock sources and serializes commands

pub mod alarm;
pub mod driver;
pub mod timer;

pub use alarm::{AlarmPhase, ALARM_WINDOW, ALERT_INTERVAL, ALERT_PULSES};
pub use driver::{EngineCommand, EngineError, EngineHandle, TimerDriver, TICK_INTERVAL};
pub use timer::{Schedule, TimerEngine, TimerEvent};
