//! Alert sound sources.
//!
//! An alert is either an audio file chosen by the user or a short sine
//! tone generated on the fly, which needs no file at all.

use std::path::{Path, PathBuf};

use super::error::SoundError;

/// Supported audio file extensions.
const SUPPORTED_EXTENSIONS: &[&str] = &["wav", "mp3", "flac", "ogg"];

/// Frequency of the built-in alert tone.
pub const DEFAULT_TONE_HZ: u32 = 880;

/// Length of the built-in alert tone.
pub const DEFAULT_TONE_MS: u64 = 250;

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// An audio file on disk.
    File {
        /// Display name (the file stem).
        name: String,
        /// Path to the sound file.
        path: PathBuf,
    },
    /// A generated sine tone.
    Tone {
        /// Tone frequency in Hz.
        frequency_hz: u32,
        /// Tone length in milliseconds.
        duration_ms: u64,
    },
}

impl SoundSource {
    /// Creates a file source after checking that the file exists and has
    /// a supported extension.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::FileNotFound` or `SoundError::UnsupportedFormat`.
    pub fn file(path: impl Into<PathBuf>) -> Result<Self, SoundError> {
        let path = path.into();
        if !path.is_file() {
            return Err(SoundError::FileNotFound(path.display().to_string()));
        }
        if !has_supported_extension(&path) {
            return Err(SoundError::UnsupportedFormat(path.display().to_string()));
        }

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sound".to_string());
        Ok(Self::File { name, path })
    }

    /// Creates a tone source.
    #[must_use]
    pub fn tone(frequency_hz: u32, duration_ms: u64) -> Self {
        Self::Tone {
            frequency_hz,
            duration_ms,
        }
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } => name,
            Self::Tone { .. } => "tone",
        }
    }

    /// Returns true if this is a file source.
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Returns the file path if this is a file source.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path, .. } => Some(path),
            Self::Tone { .. } => None,
        }
    }
}

impl Default for SoundSource {
    fn default() -> Self {
        Self::tone(DEFAULT_TONE_HZ, DEFAULT_TONE_MS)
    }
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}
