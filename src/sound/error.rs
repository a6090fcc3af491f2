//! Sound system error types.
//!
//! This module defines the error types for the alert sound playback.
//! None of them reach the timer engine; callers log and carry on.

use thiserror::Error;

/// Errors that can occur in the sound playback system.
#[derive(Debug, Error)]
pub enum SoundError {
    /// Audio device is not available (e.g., no speakers connected).
    #[error("audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// Sound file was not found at the specified path.
    #[error("sound file not found: {0}")]
    FileNotFound(String),

    /// Sound file extension is not one rodio can decode.
    #[error("unsupported sound format: {0}")]
    UnsupportedFormat(String),

    /// Failed to decode the audio file.
    #[error("failed to decode sound file: {0}")]
    DecodeError(String),

    /// Failed to create the audio output stream.
    #[error("failed to create audio stream: {0}")]
    StreamError(String),

    /// Generic sound playback error.
    #[error("sound playback error: {0}")]
    PlaybackError(String),
}

impl SoundError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }

    /// Returns true if this error is related to the audio file.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound(_) | Self::UnsupportedFormat(_) | Self::DecodeError(_)
        )
    }

    /// Returns true if playback should fall back to the generated tone.
    #[must_use]
    pub fn should_fallback_to_tone(&self) -> bool {
        self.is_file_error()
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::DeviceNotAvailable(_) => "connect an audio output device or pass --no-sound",
            Self::FileNotFound(_) => "check the --sound path; the built-in tone is used meanwhile",
            Self::UnsupportedFormat(_) => "use a wav, mp3, flac or ogg file",
            Self::DecodeError(_) => "the sound file may be corrupted",
            Self::StreamError(_) => "check the system audio settings",
            Self::PlaybackError(_) => "restart the timer",
        }
    }
}
