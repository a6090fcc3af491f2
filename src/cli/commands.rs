//! Command definitions for the Pomodoro Timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::TimerConfig;

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro Timer CLI - focused work and break sessions in the terminal
#[derive(Parser, Debug)]
#[command(
    name = "pomodoro",
    version,
    about = "A terminal Pomodoro timer",
    long_about = "A simple Pomodoro timer that alternates work and break sessions.\n\
                  When a session ends an alarm sounds for a few seconds, then the\n\
                  next session starts on its own.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the timer interactively in this terminal
    Run(RunArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Work duration in minutes (1-120)
    #[arg(
        short,
        long,
        default_value = "25",
        value_parser = clap::value_parser!(u32).range(1..=120)
    )]
    pub work: u32,

    /// Break duration in minutes (1-60)
    #[arg(
        short,
        long,
        default_value = "5",
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub break_time: u32,

    /// Audio file played on every alarm pulse (wav, mp3, flac, ogg)
    #[arg(long, value_name = "PATH", conflicts_with = "no_sound")]
    pub sound: Option<PathBuf>,

    /// Disable alarm sounds
    #[arg(long)]
    pub no_sound: bool,

    /// Print every state change as a JSON line
    #[arg(long)]
    pub json: bool,

    /// Start the countdown immediately
    #[arg(short, long)]
    pub autostart: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            work: 25,
            break_time: 5,
            sound: None,
            no_sound: false,
            json: false,
            autostart: false,
        }
    }
}

impl RunArgs {
    /// Builds the timer configuration from the minute arguments.
    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig::from_minutes(self.work, self.break_time)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_no_args() {
            let cli = Cli::parse_from(["pomodoro"]);
            assert!(cli.command.is_none());
            assert!(!cli.verbose);
        }

        #[test]
        fn test_parse_verbose_flag() {
            let cli = Cli::parse_from(["pomodoro", "--verbose"]);
            assert!(cli.verbose);

            let cli = Cli::parse_from(["pomodoro", "run", "-v"]);
            assert!(cli.verbose);
        }

        #[test]
        fn test_parse_completions_bash() {
            let cli = Cli::parse_from(["pomodoro", "completions", "bash"]);
            match cli.command {
                Some(Commands::Completions { shell }) => {
                    assert_eq!(shell, clap_complete::Shell::Bash);
                }
                _ => panic!("Expected Completions command"),
            }
        }

        #[test]
        fn test_parse_unknown_command_fails() {
            assert!(Cli::try_parse_from(["pomodoro", "serve"]).is_err());
        }
    }

    mod run_args_tests {
        use super::*;

        #[test]
        fn test_parse_run_defaults() {
            let cli = Cli::parse_from(["pomodoro", "run"]);
            match cli.command {
                Some(Commands::Run(args)) => {
                    assert_eq!(args.work, 25);
                    assert_eq!(args.break_time, 5);
                    assert!(args.sound.is_none());
                    assert!(!args.no_sound);
                    assert!(!args.json);
                    assert!(!args.autostart);
                    assert_eq!(args.timer_config(), TimerConfig::default());
                }
                _ => panic!("Expected Run command"),
            }
        }

        #[test]
        fn test_parse_run_with_options() {
            let cli = Cli::parse_from([
                "pomodoro",
                "run",
                "--work",
                "50",
                "--break-time",
                "10",
                "--sound",
                "/tmp/level-up.mp3",
                "--json",
                "-a",
            ]);
            match cli.command {
                Some(Commands::Run(args)) => {
                    assert_eq!(args.timer_config(), TimerConfig::from_minutes(50, 10));
                    assert_eq!(args.sound, Some(PathBuf::from("/tmp/level-up.mp3")));
                    assert!(args.json);
                    assert!(args.autostart);
                }
                _ => panic!("Expected Run command"),
            }
        }

        #[test]
        fn test_work_out_of_range() {
            assert!(Cli::try_parse_from(["pomodoro", "run", "--work", "0"]).is_err());
            assert!(Cli::try_parse_from(["pomodoro", "run", "--work", "121"]).is_err());
        }

        #[test]
        fn test_break_out_of_range() {
            assert!(Cli::try_parse_from(["pomodoro", "run", "-b", "0"]).is_err());
            assert!(Cli::try_parse_from(["pomodoro", "run", "-b", "61"]).is_err());
        }

        #[test]
        fn test_sound_conflicts_with_no_sound() {
            let result =
                Cli::try_parse_from(["pomodoro", "run", "--sound", "a.wav", "--no-sound"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_default_matches_parser_defaults() {
            let parsed = match Cli::parse_from(["pomodoro", "run"]).command {
                Some(Commands::Run(args)) => args,
                _ => panic!("Expected Run command"),
            };
            let default = RunArgs::default();
            assert_eq!(parsed.work, default.work);
            assert_eq!(parsed.break_time, default.break_time);
        }
    }
}
