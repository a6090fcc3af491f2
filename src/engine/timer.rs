//! Timer engine for the Pomodoro Timer.
//!
//! This module provides the core state machine:
//! - Commands (start, pause, reset, duration adjustment)
//! - Countdown progression, one tick per elapsed second
//! - The alarm phase and the automatic Work ↔ Break switch
//! - Event firing for snapshots, alerts and session switches
//!
//! The engine never touches a clock. [`TimerDriver`](super::TimerDriver)
//! calls [`TimerEngine::tick`] and [`TimerEngine::alarm_pulse`] from the
//! sources it arms according to [`TimerEngine::schedule`].

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::alarm::{AlarmPhase, AlarmStep};
use crate::types::{
    adjusted_duration, ConfigError, SessionKind, TimerConfig, TimerSnapshot, TimerStatus,
};

// ============================================================================
// TimerEvent
// ============================================================================

/// Events published by the engine.
///
/// Serializes as a flat object tagged by `event`, e.g.
/// `{"event":"alert","pulse":3}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    /// State after a mutation
    StateChanged(TimerSnapshot),
    /// A countdown reached zero and the alarm began
    SessionCompleted {
        /// Session that completed
        session: SessionKind,
    },
    /// One alert pulse of the alarm phase
    Alert {
        /// 1-based pulse number within the window
        pulse: u32,
    },
    /// The alarm was interrupted before switching sessions
    AlarmCancelled,
    /// The alarm ended and the next session began
    SessionSwitched {
        /// Session that completed
        from: SessionKind,
        /// Session now active
        to: SessionKind,
        /// Full duration of the new session
        remaining_seconds: u32,
    },
}

// ============================================================================
// Schedule
// ============================================================================

/// Clock sources the driver must keep armed for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Nothing advances the engine.
    Stopped,
    /// One tick per second.
    Countdown,
    /// One alert pulse per alert interval.
    Alarm,
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Timer engine that manages the session state and events.
#[derive(Debug)]
pub struct TimerEngine {
    /// Configured session durations
    config: TimerConfig,
    /// Active session
    session: SessionKind,
    /// Seconds left in the active session
    remaining_seconds: u32,
    /// Run status
    status: TimerStatus,
    /// Pending alarm, present between completion and session switch
    alarm: Option<AlarmPhase>,
    /// Bumped on every transition that invalidates armed clock sources
    epoch: u64,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerEngine {
    /// Creates an idle engine at the start of a work session.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured duration is zero or above the
    /// accepted maximum.
    pub fn new(
        config: TimerConfig,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            session: SessionKind::Work,
            remaining_seconds: config.work_seconds,
            status: TimerStatus::Idle,
            alarm: None,
            epoch: 0,
            event_tx,
        })
    }

    /// Starts or resumes the countdown. No-op while running.
    pub fn start(&mut self) {
        if !self.status.can_start() {
            debug!("start ignored: timer already running");
            return;
        }

        self.status = TimerStatus::Running;
        self.invalidate_schedule();
        info!(
            session = self.session.as_str(),
            remaining = self.remaining_seconds,
            "timer started"
        );
        self.publish_state();
    }

    /// Holds the countdown. No-op unless running.
    ///
    /// Pausing during the alarm ends it early: the session switch happens
    /// immediately and the new session waits, paused, at its full duration.
    pub fn pause(&mut self) {
        if self.status != TimerStatus::Running {
            debug!(status = self.status.as_str(), "pause ignored");
            return;
        }

        if self.alarm.is_some() {
            self.switch_session();
        }

        self.status = TimerStatus::Paused;
        self.invalidate_schedule();
        info!(remaining = self.remaining_seconds, "timer paused");
        self.publish_state();
    }

    /// Pauses a running timer, starts it otherwise.
    pub fn toggle(&mut self) {
        if self.status == TimerStatus::Running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Returns to an idle work session at its configured duration.
    ///
    /// A pending alarm is cancelled and its session switch suppressed.
    pub fn reset(&mut self) {
        self.cancel_alarm();
        self.status = TimerStatus::Idle;
        self.session = SessionKind::Work;
        self.remaining_seconds = self.config.work_seconds;
        self.invalidate_schedule();
        info!("timer reset");
        self.publish_state();
    }

    /// Moves the active session one step up or down from the time left.
    ///
    /// The result becomes both the session's configured duration and the
    /// new remaining time, whatever the status. A running countdown
    /// continues from it.
    pub fn adjust_duration(&mut self, increment: bool) {
        let current = self.remaining_seconds;
        let updated = adjusted_duration(current, increment);

        self.cancel_alarm();
        self.config.set_duration_for(self.session, updated);
        self.remaining_seconds = updated;
        self.invalidate_schedule();
        debug!(
            session = self.session.as_str(),
            from = current,
            to = updated,
            "duration adjusted"
        );
        self.publish_state();
    }

    /// Applies one elapsed second. No effect unless running with time left.
    pub fn tick(&mut self) {
        if self.status != TimerStatus::Running || self.remaining_seconds == 0 {
            return;
        }

        self.remaining_seconds -= 1;

        if self.remaining_seconds == 0 {
            self.alarm = Some(AlarmPhase::new(self.session));
            self.invalidate_schedule();
            info!(session = self.session.as_str(), "session completed");
            self.emit(TimerEvent::SessionCompleted {
                session: self.session,
            });
        }

        self.publish_state();
    }

    /// Fires one alert of the alarm phase, switching sessions after the last.
    pub fn alarm_pulse(&mut self) {
        let Some(alarm) = self.alarm.as_mut() else {
            return;
        };

        match alarm.pulse() {
            AlarmStep::Alert { pulse } => {
                self.emit(TimerEvent::Alert { pulse });
            }
            AlarmStep::Finished { pulse } => {
                self.emit(TimerEvent::Alert { pulse });
                self.switch_session();
                self.publish_state();
            }
        }
    }

    /// Clock sources required by the current state.
    pub fn schedule(&self) -> Schedule {
        match (self.status, self.alarm.is_some()) {
            (TimerStatus::Running, true) => Schedule::Alarm,
            (TimerStatus::Running, false) => Schedule::Countdown,
            _ => Schedule::Stopped,
        }
    }

    /// Counter that changes whenever armed clock sources become stale.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Returns a read-only view of the current state.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            session: self.session,
            remaining_seconds: self.remaining_seconds,
            status: self.status,
            work_seconds: self.config.work_seconds,
            break_seconds: self.config.break_seconds,
            alarm_active: self.alarm.is_some(),
        }
    }

    /// Returns true while the alarm phase is pending.
    pub fn is_alarm_active(&self) -> bool {
        self.alarm.is_some()
    }

    /// Ends the alarm and activates the next session at its full duration.
    fn switch_session(&mut self) {
        let from = self
            .alarm
            .take()
            .map_or(self.session, |alarm| alarm.completed());
        self.session = from.next();
        self.remaining_seconds = self.config.duration_for(self.session);
        self.invalidate_schedule();
        info!(
            from = from.as_str(),
            to = self.session.as_str(),
            "session switched"
        );
        self.emit(TimerEvent::SessionSwitched {
            from,
            to: self.session,
            remaining_seconds: self.remaining_seconds,
        });
    }

    fn cancel_alarm(&mut self) {
        if let Some(alarm) = self.alarm.take() {
            debug!(pulses = alarm.pulses_fired(), "alarm cancelled");
            self.emit(TimerEvent::AlarmCancelled);
        }
    }

    fn invalidate_schedule(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }

    fn publish_state(&self) {
        self.emit(TimerEvent::StateChanged(self.snapshot()));
    }

    fn emit(&self, event: TimerEvent) {
        // A dropped receiver only means nobody is listening any more.
        if self.event_tx.send(event).is_err() {
            debug!("event receiver dropped");
        }
    }

    /// Returns a mutable reference to the remaining time (for testing).
    #[cfg(test)]
    pub(crate) fn remaining_mut(&mut self) -> &mut u32 {
        &mut self.remaining_seconds
    }
}

// ============================================================================
// Tests
// ============================================================================
