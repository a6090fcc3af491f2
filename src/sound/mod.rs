//! Sound playback for timer alerts.
//!
//! This module provides audio notification capabilities, including:
//!
//! - A user-supplied alert file or a generated tone
//! - Non-blocking audio playback through rodio
//! - Graceful degradation when audio is unavailable
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐
//! │  AlertNotifier   │────▶│   SoundPlayer    │
//! │ (alarm pulses)   │     └────────┬─────────┘
//! └──────────────────┘              │
//!                                   ▼
//!                          ┌──────────────────┐
//!                          │   SoundSource    │
//!                          │  File │ Tone     │
//!                          └──────────────────┘
//! ```

mod alert;
mod error;
mod player;
mod source;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub use alert::AlertNotifier;
pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};
pub use source::{SoundSource, DEFAULT_TONE_HZ, DEFAULT_TONE_MS};

/// Trait for sound playback implementations.
///
/// This trait abstracts the sound playback functionality, allowing for
/// different implementations (e.g., rodio-based, mock for testing).
pub trait SoundPlayer {
    /// Plays a sound from the given source without blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;

    /// Returns true if sound playback is disabled.
    fn is_disabled(&self) -> bool;

    /// Enables sound playback.
    fn enable(&self);

    /// Disables sound playback.
    fn disable(&self);
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }

    fn is_disabled(&self) -> bool {
        RodioSoundPlayer::is_disabled(self)
    }

    fn enable(&self) {
        RodioSoundPlayer::enable(self)
    }

    fn disable(&self) {
        RodioSoundPlayer::disable(self)
    }
}

impl<P: SoundPlayer + ?Sized> SoundPlayer for Arc<P> {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        (**self).play(source)
    }

    fn is_disabled(&self) -> bool {
        (**self).is_disabled()
    }

    fn enable(&self) {
        (**self).enable()
    }

    fn disable(&self) {
        (**self).disable()
    }
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<SoundSource>>,
    disabled: AtomicBool,
    should_fail: AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<SoundSource> {
        self.play_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        if self.disabled.load(Ordering::SeqCst) {
            return Ok(());
        }
        self.play_calls
            .lock()
            .map_err(|e| SoundError::PlaybackError(e.to_string()))?
            .push(source.clone());
        Ok(())
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    fn enable(&self) {
        self.disabled.store(false, Ordering::SeqCst);
    }

    fn disable(&self) {
        self.disabled.store(true, Ordering::SeqCst);
    }
}
