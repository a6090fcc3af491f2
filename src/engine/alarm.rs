//! Alarm sub-phase entered when a countdown reaches zero.
//!
//! The alarm is a fixed number of alert pulses, one per
//! [`ALERT_INTERVAL`]. Once the last pulse has fired the engine switches
//! to the next session. The phase carries no timer of its own; the driver
//! arms an alert-cadence source while an alarm is pending and drops it on
//! every transition.

use tokio::time::Duration;

use crate::types::SessionKind;

/// Cadence of the alert signal.
pub const ALERT_INTERVAL: Duration = Duration::from_secs(1);

/// Number of alert pulses before the session switch.
pub const ALERT_PULSES: u32 = 7;

/// Length of the alarm window.
pub const ALARM_WINDOW: Duration = Duration::from_secs(ALERT_PULSES as u64);

/// Progress through an alarm window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmPhase {
    /// Session whose countdown completed
    completed: SessionKind,
    /// Pulses fired so far
    pulses_fired: u32,
}

/// Result of advancing the alarm by one pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmStep {
    /// An alert fired; more pulses follow.
    Alert { pulse: u32 },
    /// The final alert fired; the window has elapsed.
    Finished { pulse: u32 },
}

impl AlarmPhase {
    /// Begins an alarm for the session that just completed.
    pub fn new(completed: SessionKind) -> Self {
        Self {
            completed,
            pulses_fired: 0,
        }
    }

    /// Session whose countdown completed.
    pub fn completed(&self) -> SessionKind {
        self.completed
    }

    /// Pulses fired so far.
    pub fn pulses_fired(&self) -> u32 {
        self.pulses_fired
    }

    /// Advances by one cadence period.
    pub fn pulse(&mut self) -> AlarmStep {
        self.pulses_fired = (self.pulses_fired + 1).min(ALERT_PULSES);
        if self.pulses_fired >= ALERT_PULSES {
            AlarmStep::Finished {
                pulse: self.pulses_fired,
            }
        } else {
            AlarmStep::Alert {
                pulse: self.pulses_fired,
            }
        }
    }
}
