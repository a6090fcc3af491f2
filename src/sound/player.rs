//! Sound player implementation using rodio.
//!
//! This module provides the `RodioSoundPlayer` which uses the rodio v0.20
//! audio library for cross-platform sound playback.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::{SoundSource, DEFAULT_TONE_HZ, DEFAULT_TONE_MS};

/// Output volume of generated tones.
const TONE_AMPLITUDE: f32 = 0.2;

/// A sound player that uses rodio for audio playback.
///
/// Sound playback is non-blocking; sounds continue playing in the background.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
    /// Whether sound playback is disabled.
    disabled: AtomicBool,
}

impl RodioSoundPlayer {
    /// Creates a new sound player.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new(disabled: bool) -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
            disabled: AtomicBool::new(disabled),
        })
    }

    /// Plays a sound from the given source.
    ///
    /// A file that cannot be opened or decoded falls back to the default tone.
    ///
    /// # Errors
    ///
    /// Returns an error if the output sink cannot be created.
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.disabled.load(Ordering::Relaxed) {
            debug!("Sound playback disabled, skipping");
            return Ok(());
        }

        match source {
            SoundSource::File { path, name } => match self.play_file(path) {
                Ok(()) => Ok(()),
                Err(e) if e.should_fallback_to_tone() => {
                    warn!("Failed to play sound '{}': {}, falling back to tone", name, e);
                    self.play_tone(DEFAULT_TONE_HZ, DEFAULT_TONE_MS)
                }
                Err(e) => Err(e),
            },
            SoundSource::Tone {
                frequency_hz,
                duration_ms,
            } => self.play_tone(*frequency_hz, *duration_ms),
        }
    }

    fn play_file(&self, path: &Path) -> Result<(), SoundError> {
        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| SoundError::DecodeError(e.to_string()))?;

        let sink = self.new_sink()?;
        sink.append(decoder);
        sink.detach(); // Non-blocking: sound continues after function returns

        debug!("Sound file playback started (detached)");
        Ok(())
    }

    fn play_tone(&self, frequency_hz: u32, duration_ms: u64) -> Result<(), SoundError> {
        let tone = SineWave::new(frequency_hz as f32)
            .take_duration(Duration::from_millis(duration_ms))
            .amplify(TONE_AMPLITUDE);

        let sink = self.new_sink()?;
        sink.append(tone);
        sink.detach();

        debug!(frequency_hz, duration_ms, "Tone playback started (detached)");
        Ok(())
    }

    fn new_sink(&self) -> Result<Sink, SoundError> {
        Sink::try_new(&self.stream_handle).map_err(|e| SoundError::StreamError(e.to_string()))
    }

    /// Returns true if sound playback is currently disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Relaxed)
    }

    /// Enables sound playback.
    pub fn enable(&self) {
        self.disabled.store(false, Ordering::Relaxed);
    }

    /// Disables sound playback.
    pub fn disable(&self) {
        self.disabled.store(true, Ordering::Relaxed);
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer")
            .field("disabled", &self.disabled.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Creates a sound player, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and None is returned.
#[must_use]
pub fn try_create_player(disabled: bool) -> Option<RodioSoundPlayer> {
    match RodioSoundPlayer::new(disabled) {
        Ok(player) => Some(player),
        Err(e) => {
            warn!("Audio not available, sound disabled: {} ({})", e, e.suggestion());
            None
        }
    }
}
