//! Keyboard commands read from stdin by `pomodoro run`.

use thiserror::Error;

/// A command typed by the user, one per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    /// Start when stopped, pause when running
    Toggle,
    /// Start or resume
    Start,
    /// Pause
    Pause,
    /// Back to an idle work session
    Reset,
    /// One more minute for the active session
    Increase,
    /// One minute less for the active session
    Decrease,
    /// Show the current state
    Status,
    /// Mute or unmute the alarm sound
    Mute,
    /// Show the key help and a short technique summary
    Help,
    /// Leave the program
    Quit,
}

/// Errors from [`InputCommand::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The line is not a known command.
    #[error("unknown command '{0}' (type ? for help)")]
    Unknown(String),
}

impl InputCommand {
    /// Parses one input line.
    ///
    /// Returns `Ok(None)` for an empty line. A line of only spaces is the
    /// space bar and toggles the timer.
    pub fn parse(line: &str) -> Result<Option<Self>, InputError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(line.contains(' ').then_some(Self::Toggle));
        }

        let command = match trimmed.to_ascii_lowercase().as_str() {
            "s" | "toggle" => Self::Toggle,
            "start" | "resume" => Self::Start,
            "p" | "pause" => Self::Pause,
            "r" | "reset" => Self::Reset,
            "+" | "=" | "up" => Self::Increase,
            "-" | "_" | "down" => Self::Decrease,
            "i" | "status" => Self::Status,
            "m" | "mute" => Self::Mute,
            "?" | "h" | "help" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => return Err(InputError::Unknown(trimmed.to_string())),
        };
        Ok(Some(command))
    }
}
