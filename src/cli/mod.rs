//! CLI module for the Pomodoro Timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `input`: Keyboard commands typed during a session
//! - `display`: Output formatting and display logic
//! - `session`: The interactive `run` loop

pub mod commands;
pub mod display;
pub mod input;
pub mod session;

pub use commands::{Cli, Commands, RunArgs};
pub use display::Display;
pub use input::{InputCommand, InputError};
pub use session::{build_notifier, run_interactive, run_session};
