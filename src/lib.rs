//! Pomodoro Timer Library
//!
//! This library provides the core functionality for the Pomodoro Timer CLI.
//! It includes:
//! - Timer engine: the work/break state machine and its alarm phase
//! - Clock driver that owns and cancels the tick and alert sources
//! - Sound playback for alarm alerts
//! - CLI command parsing, keyboard input and display utilities
//! - Type definitions for configuration and state snapshots

pub mod cli;
pub mod engine;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{ConfigError, SessionKind, TimerConfig, TimerSnapshot, TimerStatus};

pub use engine::{EngineError, EngineHandle, TimerDriver, TimerEngine, TimerEvent};

pub use sound::{
    AlertNotifier, MockSoundPlayer, RodioSoundPlayer, SoundError, SoundPlayer, SoundSource,
};
