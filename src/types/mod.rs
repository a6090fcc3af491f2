//! Core data types for the Pomodoro Timer.
//!
//! This module defines the data structures used for:
//! - Session and status enums of the timer state machine
//! - Timer configuration with validation
//! - Read-only state snapshots published after every mutation

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest duration a session can be adjusted down to.
pub const MIN_SESSION_SECONDS: u32 = 60;

/// Step applied by a single duration adjustment.
pub const ADJUST_STEP_SECONDS: u32 = 60;

/// Largest accepted session duration (24 hours).
pub const MAX_SESSION_SECONDS: u32 = 24 * 60 * 60;

// ============================================================================
// SessionKind
// ============================================================================

/// The two alternating session types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    /// Focused work
    #[default]
    Work,
    /// Rest between work sessions
    Break,
}

impl SessionKind {
    /// Returns the string representation of the session.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Work => "work",
            SessionKind::Break => "break",
        }
    }

    /// Returns the label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            SessionKind::Work => "Work",
            SessionKind::Break => "Break",
        }
    }

    /// Returns the session that follows this one.
    pub fn next(&self) -> Self {
        match self {
            SessionKind::Work => SessionKind::Break,
            SessionKind::Break => SessionKind::Work,
        }
    }
}

// ============================================================================
// TimerStatus
// ============================================================================

/// Run status of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimerStatus {
    /// Not started, or reset
    #[default]
    Idle,
    /// Counting down
    Running,
    /// Countdown held
    Paused,
}

impl TimerStatus {
    /// Returns the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
        }
    }

    /// Returns true if `start` would move the timer to Running.
    pub fn can_start(&self) -> bool {
        matches!(self, TimerStatus::Idle | TimerStatus::Paused)
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Errors returned by [`TimerConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Work duration outside `1..=MAX_SESSION_SECONDS`.
    #[error("work duration must be between 1 and {max} seconds (got {0})", max = MAX_SESSION_SECONDS)]
    WorkOutOfRange(u32),

    /// Break duration outside `1..=MAX_SESSION_SECONDS`.
    #[error("break duration must be between 1 and {max} seconds (got {0})", max = MAX_SESSION_SECONDS)]
    BreakOutOfRange(u32),
}

/// Configured duration of each session, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Work session duration in seconds
    pub work_seconds: u32,
    /// Break session duration in seconds
    pub break_seconds: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_seconds: 25 * 60,
            break_seconds: 5 * 60,
        }
    }
}

impl TimerConfig {
    /// Creates a configuration from whole minutes.
    pub fn from_minutes(work_minutes: u32, break_minutes: u32) -> Self {
        Self {
            work_seconds: work_minutes.saturating_mul(60),
            break_seconds: break_minutes.saturating_mul(60),
        }
    }

    /// Sets the work duration.
    pub fn with_work_seconds(mut self, seconds: u32) -> Self {
        self.work_seconds = seconds;
        self
    }

    /// Sets the break duration.
    pub fn with_break_seconds(mut self, seconds: u32) -> Self {
        self.break_seconds = seconds;
        self
    }

    /// Returns the configured duration of `session`.
    pub fn duration_for(&self, session: SessionKind) -> u32 {
        match session {
            SessionKind::Work => self.work_seconds,
            SessionKind::Break => self.break_seconds,
        }
    }

    /// Overwrites the configured duration of `session`.
    pub fn set_duration_for(&mut self, session: SessionKind, seconds: u32) {
        match session {
            SessionKind::Work => self.work_seconds = seconds,
            SessionKind::Break => self.break_seconds = seconds,
        }
    }

    /// Upper bound for `remaining_seconds`.
    pub fn longest(&self) -> u32 {
        self.work_seconds.max(self.break_seconds)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.work_seconds == 0 || self.work_seconds > MAX_SESSION_SECONDS {
            return Err(ConfigError::WorkOutOfRange(self.work_seconds));
        }
        if self.break_seconds == 0 || self.break_seconds > MAX_SESSION_SECONDS {
            return Err(ConfigError::BreakOutOfRange(self.break_seconds));
        }
        Ok(())
    }
}

/// Applies one ±60 second step to `current`, clamped to the session bounds.
pub fn adjusted_duration(current: u32, increment: bool) -> u32 {
    let stepped = if increment {
        current.saturating_add(ADJUST_STEP_SECONDS)
    } else {
        current.saturating_sub(ADJUST_STEP_SECONDS)
    };
    stepped.clamp(MIN_SESSION_SECONDS, MAX_SESSION_SECONDS)
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Read-only view of the engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    /// Active session
    pub session: SessionKind,
    /// Seconds left in the active session
    pub remaining_seconds: u32,
    /// Run status
    pub status: TimerStatus,
    /// Configured work duration
    pub work_seconds: u32,
    /// Configured break duration
    pub break_seconds: u32,
    /// True while the alarm phase is sounding
    pub alarm_active: bool,
}

impl TimerSnapshot {
    /// Returns the configuration carried by this snapshot.
    pub fn config(&self) -> TimerConfig {
        TimerConfig {
            work_seconds: self.work_seconds,
            break_seconds: self.break_seconds,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
