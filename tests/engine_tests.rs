//! Integration tests for the timer engine and its clock driver.
//!
//! These tests drive the public API end to end on tokio's paused clock:
//! - Full countdown, alarm window and automatic session switch
//! - Duration adjustment scenarios
//! - Reset and pause interrupting the alarm
//! - Event stream ordering seen by a presentation layer

use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};

use pomodoro::engine::{EngineHandle, TimerDriver, TimerEngine, TimerEvent, ALERT_PULSES};
use pomodoro::types::{SessionKind, TimerConfig, TimerStatus};

// ============================================================================
// Test Helpers
// ============================================================================

fn spawn(config: TimerConfig) -> (EngineHandle, mpsc::UnboundedReceiver<TimerEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let (handle, _join) = TimerDriver::spawn(config, tx).unwrap();
    (handle, rx)
}

fn drain(rx: &mut mpsc::UnboundedReceiver<TimerEvent>) -> Vec<TimerEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Sleeps to half a second past `seconds`, away from any tick boundary.
async fn advance_to_mid_second(seconds: u64) {
    sleep(Duration::from_millis(seconds * 1000 + 500)).await;
}

// ============================================================================
// Full cycle
// ============================================================================

#[tokio::test(start_paused = true)]
async fn full_work_session_alarm_then_break() {
    let config = TimerConfig {
        work_seconds: 1500,
        break_seconds: 300,
    };
    let (handle, mut rx) = spawn(config);

    handle.start().unwrap();
    advance_to_mid_second(1500).await;

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.remaining_seconds, 0);
    assert!(snapshot.alarm_active);
    assert_eq!(snapshot.session, SessionKind::Work);

    sleep(Duration::from_secs(7)).await;

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.session, SessionKind::Break);
    assert_eq!(snapshot.remaining_seconds, 300);
    assert_eq!(snapshot.status, TimerStatus::Running);
    assert!(!snapshot.alarm_active);

    let events = drain(&mut rx);
    let completed = events
        .iter()
        .filter(|e| matches!(e, TimerEvent::SessionCompleted { .. }))
        .count();
    let alerts = events
        .iter()
        .filter(|e| matches!(e, TimerEvent::Alert { .. }))
        .count();
    let switches = events
        .iter()
        .filter(|e| matches!(e, TimerEvent::SessionSwitched { .. }))
        .count();
    assert_eq!(completed, 1);
    assert_eq!(alerts, ALERT_PULSES as usize);
    assert_eq!(switches, 1);

    // Countdown resumed in the break without another start.
    sleep(Duration::from_secs(10)).await;
    assert_eq!(handle.snapshot().await.unwrap().remaining_seconds, 290);
}

#[tokio::test(start_paused = true)]
async fn cycle_returns_to_work_after_break() {
    let config = TimerConfig::default()
        .with_work_seconds(5)
        .with_break_seconds(3);
    let (handle, _rx) = spawn(config);

    handle.start().unwrap();
    // 5 s work + 7 s alarm + 3 s break + 7 s alarm
    advance_to_mid_second(22).await;

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.session, SessionKind::Work);
    assert_eq!(snapshot.remaining_seconds, 5);
    assert_eq!(snapshot.status, TimerStatus::Running);
}

#[tokio::test(start_paused = true)]
async fn remaining_is_non_increasing_while_running() {
    let config = TimerConfig::default().with_work_seconds(30);
    let (handle, mut rx) = spawn(config);

    handle.start().unwrap();
    advance_to_mid_second(30).await;

    let remaining: Vec<u32> = drain(&mut rx)
        .into_iter()
        .filter_map(|e| match e {
            TimerEvent::StateChanged(s) => Some(s.remaining_seconds),
            _ => None,
        })
        .collect();

    assert!(remaining.windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(remaining.first(), Some(&30));
    assert_eq!(remaining.last(), Some(&0));
}

// ============================================================================
// Adjustment scenarios
// ============================================================================

#[tokio::test(start_paused = true)]
async fn adjust_up_while_idle() {
    let (handle, _rx) = spawn(TimerConfig::default());

    handle.adjust_duration(true).unwrap();

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.work_seconds, 1560);
    assert_eq!(snapshot.remaining_seconds, 1560);
    assert_eq!(snapshot.status, TimerStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn adjust_down_at_two_minutes_left_leaves_one_minute() {
    let (handle, _rx) = spawn(TimerConfig::default());

    handle.start().unwrap();
    advance_to_mid_second(1380).await;
    assert_eq!(handle.snapshot().await.unwrap().remaining_seconds, 120);

    handle.adjust_duration(false).unwrap();

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.work_seconds, 60);
    assert_eq!(snapshot.remaining_seconds, 60);
    assert_eq!(snapshot.status, TimerStatus::Running);

    advance_to_mid_second(5).await;
    assert_eq!(handle.snapshot().await.unwrap().remaining_seconds, 55);
}

#[tokio::test(start_paused = true)]
async fn adjust_never_goes_below_one_minute() {
    let config = TimerConfig::default().with_work_seconds(150);
    let (handle, _rx) = spawn(config);

    for _ in 0..10 {
        handle.adjust_duration(false).unwrap();
    }

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.work_seconds, 60);
    assert_eq!(snapshot.remaining_seconds, 60);
}

// ============================================================================
// Interruptions
// ============================================================================

#[tokio::test(start_paused = true)]
async fn pause_while_idle_changes_nothing() {
    let (handle, mut rx) = spawn(TimerConfig::default());
    let before = handle.snapshot().await.unwrap();

    handle.pause().unwrap();

    assert_eq!(handle.snapshot().await.unwrap(), before);
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test(start_paused = true)]
async fn reset_during_alarm_suppresses_switch() {
    let config = TimerConfig::default().with_work_seconds(4);
    let (handle, mut rx) = spawn(config);

    handle.start().unwrap();
    advance_to_mid_second(6).await;
    assert!(handle.snapshot().await.unwrap().alarm_active);

    handle.reset().unwrap();
    sleep(Duration::from_secs(30)).await;

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.status, TimerStatus::Idle);
    assert_eq!(snapshot.session, SessionKind::Work);
    assert_eq!(snapshot.remaining_seconds, 4);

    let events = drain(&mut rx);
    assert!(events.contains(&TimerEvent::AlarmCancelled));
    assert!(!events
        .iter()
        .any(|e| matches!(e, TimerEvent::SessionSwitched { .. })));
}

#[tokio::test(start_paused = true)]
async fn pause_and_resume_continue_countdown() {
    let (handle, _rx) = spawn(TimerConfig::default());

    handle.toggle().unwrap();
    advance_to_mid_second(10).await;
    handle.toggle().unwrap();
    sleep(Duration::from_secs(60)).await;
    assert_eq!(handle.snapshot().await.unwrap().remaining_seconds, 1490);

    handle.toggle().unwrap();
    sleep(Duration::from_millis(5_200)).await;
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.status, TimerStatus::Running);
    assert_eq!(snapshot.remaining_seconds, 1485);
}

// ============================================================================
// Synchronous engine
// ============================================================================

#[test]
fn engine_reset_from_any_state_is_canonical() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let config = TimerConfig::default().with_work_seconds(3);
    let mut engine = TimerEngine::new(config, tx).unwrap();

    engine.start();
    engine.tick();
    engine.adjust_duration(true);
    engine.pause();
    engine.reset();

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.status, TimerStatus::Idle);
    assert_eq!(snapshot.session, SessionKind::Work);
    assert_eq!(snapshot.remaining_seconds, snapshot.work_seconds);
    assert_eq!(snapshot.work_seconds, 62);
}

#[test]
fn engine_rejects_zero_duration() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let config = TimerConfig::default().with_work_seconds(0);

    assert!(TimerEngine::new(config, tx).is_err());
}
