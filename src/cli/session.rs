//! Interactive terminal session for `pomodoro run`.
//!
//! Wires the pieces together: stdin commands go to the engine handle,
//! engine events go to the display, and alarm pulses go to the alert
//! notifier. Everything runs on the calling task except the driver.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::commands::RunArgs;
use super::display::Display;
use super::input::InputCommand;
use crate::engine::{EngineHandle, TimerDriver, TimerEvent};
use crate::sound::{try_create_player, AlertNotifier, SoundSource};
use crate::types::TimerSnapshot;

/// Runs the timer against the process stdin until quit, EOF or Ctrl-C.
pub async fn run_interactive(args: &RunArgs) -> Result<TimerSnapshot> {
    let notifier = build_notifier(args)?;
    let stdin = BufReader::new(tokio::io::stdin());
    run_session(args, notifier, stdin).await
}

/// Runs the timer reading commands from `input`.
///
/// Returns the final state once the session ends.
pub async fn run_session<R>(
    args: &RunArgs,
    notifier: AlertNotifier,
    input: R,
) -> Result<TimerSnapshot>
where
    R: AsyncBufRead + Unpin,
{
    let config = args.timer_config();
    let display = Display::new(args.json);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (handle, driver) =
        TimerDriver::spawn(config, event_tx).context("invalid timer configuration")?;

    info!(
        work_seconds = config.work_seconds,
        break_seconds = config.break_seconds,
        audible = notifier.is_audible(),
        "session started"
    );

    display.show_help();
    display.show_snapshot(&handle.snapshot().await?);
    if args.autostart {
        handle.start()?;
    }

    let mut lines = input.lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read input")? else {
                    debug!("input closed");
                    break;
                };
                match InputCommand::parse(&line) {
                    Ok(Some(command)) => {
                        if !dispatch(&handle, &display, &notifier, command).await? {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => Display::show_error(&e.to_string()),
                }
            }
            event = event_rx.recv() => {
                let Some(event) = event else { break };
                if let TimerEvent::Alert { pulse } = event {
                    notifier.notify(pulse);
                }
                display.show_event(&event);
            }
            _ = &mut ctrl_c => {
                info!("interrupted");
                break;
            }
        }
    }

    // The driver may already be gone if every sender dropped.
    let _ = handle.shutdown();
    let last = driver.await.context("timer driver task failed")?;

    // Show what the driver published before it stopped; alerts stay silent.
    while let Ok(event) = event_rx.try_recv() {
        display.show_event(&event);
    }
    display.finish();
    Ok(last)
}

/// Applies one user command. Returns false when the session should end.
async fn dispatch(
    handle: &EngineHandle,
    display: &Display,
    notifier: &AlertNotifier,
    command: InputCommand,
) -> Result<bool> {
    debug!(?command, "input command");
    match command {
        InputCommand::Toggle => handle.toggle()?,
        InputCommand::Start => handle.start()?,
        InputCommand::Pause => handle.pause()?,
        InputCommand::Reset => handle.reset()?,
        InputCommand::Increase => handle.adjust_duration(true)?,
        InputCommand::Decrease => handle.adjust_duration(false)?,
        InputCommand::Status => display.show_status(&handle.snapshot().await?),
        InputCommand::Mute => display.show_sound(notifier.toggle_mute()),
        InputCommand::Help => display.show_help(),
        InputCommand::Quit => return Ok(false),
    }
    Ok(true)
}

/// Chooses the alert sound for the run arguments.
///
/// A missing audio device silences alerts; an unusable `--sound` file is an error.
pub fn build_notifier(args: &RunArgs) -> Result<AlertNotifier> {
    if args.no_sound {
        return Ok(AlertNotifier::silent());
    }

    let source = match &args.sound {
        Some(path) => SoundSource::file(path)
            .with_context(|| format!("cannot use sound file {}", path.display()))?,
        None => SoundSource::default(),
    };

    Ok(match try_create_player(false) {
        Some(player) => AlertNotifier::new(Box::new(player), source),
        None => AlertNotifier::silent(),
    })
}
