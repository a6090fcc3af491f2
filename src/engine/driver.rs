//! Clock driver for the timer engine.
//!
//! A single tokio task owns the [`TimerEngine`] and every clock source
//! that advances it. Commands arrive over a channel and are serialized
//! with ticks in one `select!` loop, so no two mutations ever overlap.
//!
//! Whenever the engine's schedule epoch changes, all armed sources are
//! dropped before new ones are created for the new state. A stale tick or
//! alert can therefore never reach the engine after a transition.

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

use super::alarm::ALERT_INTERVAL;
use super::timer::{Schedule, TimerEngine, TimerEvent};
use crate::types::{ConfigError, TimerConfig, TimerSnapshot};

/// Countdown resolution: one tick per second.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

// ============================================================================
// Commands
// ============================================================================

/// Commands accepted by the driver task.
#[derive(Debug)]
pub enum EngineCommand {
    /// Start or resume the countdown
    Start,
    /// Hold the countdown
    Pause,
    /// Pause when running, start otherwise
    Toggle,
    /// Return to an idle work session
    Reset,
    /// Step the active session's duration
    AdjustDuration {
        /// `true` adds a minute, `false` removes one
        increment: bool,
    },
    /// Reply with the current state
    Snapshot(oneshot::Sender<TimerSnapshot>),
    /// Stop the driver task
    Shutdown,
}

/// Errors returned by [`EngineHandle`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The driver task is no longer running.
    #[error("timer driver has stopped")]
    DriverStopped,
}

// ============================================================================
// EngineHandle
// ============================================================================

/// Cloneable handle used to send commands to a running driver.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    command_tx: mpsc::UnboundedSender<EngineCommand>,
}

impl EngineHandle {
    /// Starts or resumes the countdown.
    pub fn start(&self) -> Result<(), EngineError> {
        self.send(EngineCommand::Start)
    }

    /// Pauses the countdown.
    pub fn pause(&self) -> Result<(), EngineError> {
        self.send(EngineCommand::Pause)
    }

    /// Pauses when running, starts otherwise.
    pub fn toggle(&self) -> Result<(), EngineError> {
        self.send(EngineCommand::Toggle)
    }

    /// Resets to an idle work session.
    pub fn reset(&self) -> Result<(), EngineError> {
        self.send(EngineCommand::Reset)
    }

    /// Adds or removes one minute from the active session.
    pub fn adjust_duration(&self, increment: bool) -> Result<(), EngineError> {
        self.send(EngineCommand::AdjustDuration { increment })
    }

    /// Asks the driver to stop.
    pub fn shutdown(&self) -> Result<(), EngineError> {
        self.send(EngineCommand::Shutdown)
    }

    /// Returns the current state.
    pub async fn snapshot(&self) -> Result<TimerSnapshot, EngineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(EngineCommand::Snapshot(reply_tx))?;
        reply_rx.await.map_err(|_| EngineError::DriverStopped)
    }

    fn send(&self, command: EngineCommand) -> Result<(), EngineError> {
        self.command_tx
            .send(command)
            .map_err(|_| EngineError::DriverStopped)
    }
}

// ============================================================================
// TimerDriver
// ============================================================================

/// Clock sources armed for one schedule epoch.
#[derive(Debug, Default)]
struct ArmedSources {
    epoch: Option<u64>,
    tick: Option<Interval>,
    alert: Option<Interval>,
}

impl ArmedSources {
    fn cancel_all(&mut self) {
        self.tick = None;
        self.alert = None;
    }
}

/// Task that advances a [`TimerEngine`] in real time.
#[derive(Debug)]
pub struct TimerDriver {
    engine: TimerEngine,
    command_rx: mpsc::UnboundedReceiver<EngineCommand>,
    sources: ArmedSources,
}

impl TimerDriver {
    /// Creates a driver and the handle that controls it.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(
        config: TimerConfig,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Result<(Self, EngineHandle), ConfigError> {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let driver = Self {
            engine: TimerEngine::new(config, event_tx)?,
            command_rx,
            sources: ArmedSources::default(),
        };
        Ok((driver, EngineHandle { command_tx }))
    }

    /// Spawns the driver on the current runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid; nothing is spawned.
    pub fn spawn(
        config: TimerConfig,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Result<(EngineHandle, JoinHandle<TimerSnapshot>), ConfigError> {
        let (driver, handle) = Self::new(config, event_tx)?;
        Ok((handle, tokio::spawn(driver.run())))
    }

    /// Runs until shutdown or until every handle is dropped.
    ///
    /// Returns the final state.
    pub async fn run(mut self) -> TimerSnapshot {
        info!("timer driver started");

        loop {
            self.rearm();

            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(EngineCommand::Shutdown) | None => break,
                    Some(command) => self.apply(command),
                },
                _ = next_fire(&mut self.sources.tick) => self.engine.tick(),
                _ = next_fire(&mut self.sources.alert) => self.engine.alarm_pulse(),
            }
        }

        self.sources.cancel_all();
        info!("timer driver stopped");
        self.engine.snapshot()
    }

    fn apply(&mut self, command: EngineCommand) {
        debug!(?command, "command received");
        match command {
            EngineCommand::Start => self.engine.start(),
            EngineCommand::Pause => self.engine.pause(),
            EngineCommand::Toggle => self.engine.toggle(),
            EngineCommand::Reset => self.engine.reset(),
            EngineCommand::AdjustDuration { increment } => self.engine.adjust_duration(increment),
            EngineCommand::Snapshot(reply) => {
                let _ = reply.send(self.engine.snapshot());
            }
            EngineCommand::Shutdown => {}
        }
    }

    /// Replaces the armed sources when the engine's epoch moved on.
    fn rearm(&mut self) {
        let epoch = self.engine.epoch();
        if self.sources.epoch == Some(epoch) {
            return;
        }

        self.sources.cancel_all();
        self.sources.epoch = Some(epoch);

        let schedule = self.engine.schedule();
        match schedule {
            Schedule::Stopped => {}
            Schedule::Countdown => self.sources.tick = Some(periodic(TICK_INTERVAL)),
            Schedule::Alarm => self.sources.alert = Some(periodic(ALERT_INTERVAL)),
        }
        debug!(epoch, ?schedule, "clock sources rearmed");
    }
}

/// Interval whose first fire is one full period from now.
fn periodic(period: Duration) -> Interval {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

/// Waits for the next fire of an optional source; never resolves when unarmed.
async fn next_fire(source: &mut Option<Interval>) {
    match source {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

// ============================================================================
// Tests
// ============================================================================
