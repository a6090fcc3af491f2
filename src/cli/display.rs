//! Display utilities for the Pomodoro Timer CLI.
//!
//! This module provides formatted output for:
//! - The live countdown line
//! - Alarm and session switch messages
//! - Status, help and error messages

use std::io::{IsTerminal, Write};

use serde::Serialize;

use crate::engine::TimerEvent;
use crate::types::{SessionKind, TimerSnapshot, TimerStatus};

/// Clears the current terminal line.
const CLEAR_LINE: &str = "\r\x1b[2K";

// ============================================================================
// Display
// ============================================================================

/// Renders engine output to the terminal.
#[derive(Debug, Clone, Copy)]
pub struct Display {
    /// Print snapshots as JSON lines
    json: bool,
    /// Redraw the countdown in place instead of printing a line per tick
    live: bool,
}

impl Display {
    /// Creates a display for stdout.
    pub fn new(json: bool) -> Self {
        Self {
            json,
            live: !json && std::io::stdout().is_terminal(),
        }
    }

    /// Renders one engine event.
    ///
    /// In JSON mode every event becomes one line tagged by `event`.
    pub fn show_event(&self, event: &TimerEvent) {
        if self.json {
            Self::print_json(event);
            return;
        }

        match event {
            TimerEvent::StateChanged(snapshot) => self.show_snapshot(snapshot),
            TimerEvent::SessionCompleted { session } => {
                self.show_line(&format!("{} session complete!", session.label()));
            }
            TimerEvent::Alert { pulse } => {
                if !self.live {
                    println!("  alarm #{}", pulse);
                }
            }
            TimerEvent::AlarmCancelled => {
                self.show_line("Alarm cancelled");
            }
            TimerEvent::SessionSwitched {
                to,
                remaining_seconds,
                ..
            } => {
                self.show_line(&format!(
                    "{} session started ({})",
                    to.label(),
                    Self::format_clock(*remaining_seconds)
                ));
            }
        }
    }

    /// Renders a state snapshot.
    pub fn show_snapshot(&self, snapshot: &TimerSnapshot) {
        if self.json {
            Self::print_json(snapshot);
            return;
        }

        let line = Self::status_line(snapshot);
        if self.live {
            print!("{}{}", CLEAR_LINE, line);
            let _ = std::io::stdout().flush();
        } else {
            println!("{}", line);
        }
    }

    /// Shows the full status block.
    pub fn show_status(&self, snapshot: &TimerSnapshot) {
        if self.json {
            self.show_snapshot(snapshot);
            return;
        }

        self.break_live_line();
        println!("Pomodoro Timer status");
        println!("─────────────────────");
        println!("Session:   {}", snapshot.session.label());
        println!("State:     {}", Self::status_label(snapshot));
        println!("Remaining: {}", Self::format_clock(snapshot.remaining_seconds));
        println!("Work:      {}", Self::format_clock(snapshot.work_seconds));
        println!("Break:     {}", Self::format_clock(snapshot.break_seconds));
    }

    /// Shows the key bindings and a short explanation of the technique.
    pub fn show_help(&self) {
        if self.json {
            return;
        }

        self.break_live_line();
        println!("Keys (press Enter after each):");
        println!("  s or space  start / pause");
        println!("  p           pause");
        println!("  r           reset to a fresh work session");
        println!("  + / -       add / remove one minute of the current session");
        println!("  i           show status");
        println!("  m           mute / unmute the alarm");
        println!("  q           quit");
        println!();
        println!("The Pomodoro Technique: work for 25 minutes, then take a 5 minute");
        println!("break. After 4 rounds, take a longer break of 15-30 minutes.");
    }

    /// Reports whether alarm sounds are on.
    pub fn show_sound(&self, audible: bool) {
        if self.json {
            return;
        }
        self.show_line(if audible { "Sound on" } else { "Sound off" });
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }

    /// Ends an in-place countdown line so the next output starts clean.
    pub fn finish(&self) {
        self.break_live_line();
    }

    /// Single-line summary of a snapshot, e.g. `[Work] 24:59 running`.
    pub fn status_line(snapshot: &TimerSnapshot) -> String {
        format!(
            "[{}] {} {}",
            snapshot.session.label(),
            Self::format_clock(snapshot.remaining_seconds),
            Self::status_label(snapshot)
        )
    }

    /// Formats seconds as zero-padded `MM:SS`. Minutes are not wrapped at 60.
    pub fn format_clock(total_seconds: u32) -> String {
        format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
    }

    fn print_json<T: Serialize>(value: &T) {
        match serde_json::to_string(value) {
            Ok(line) => println!("{}", line),
            Err(e) => Self::show_error(&e.to_string()),
        }
    }

    fn status_label(snapshot: &TimerSnapshot) -> &'static str {
        if snapshot.alarm_active {
            return match snapshot.session {
                SessionKind::Work => "time for a break!",
                SessionKind::Break => "back to work!",
            };
        }
        match snapshot.status {
            TimerStatus::Idle => "ready",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
        }
    }

    fn show_line(&self, message: &str) {
        self.break_live_line();
        println!("{}", message);
    }

    fn break_live_line(&self) {
        if self.live {
            print!("{}", CLEAR_LINE);
            let _ = std::io::stdout().flush();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
