//! Alert consumer for the alarm phase.
//!
//! Each `TimerEvent::Alert` pulse is turned into one sound. Playback
//! failures are logged and swallowed: the session switch is driven by
//! elapsed time in the engine, never by whether a sound was heard.

use tracing::{debug, warn};

use super::{SoundPlayer, SoundSource};

/// Plays the alert sound for each alarm pulse.
pub struct AlertNotifier {
    player: Option<Box<dyn SoundPlayer>>,
    source: SoundSource,
}

impl AlertNotifier {
    /// Creates a notifier that plays `source` through `player`.
    pub fn new(player: Box<dyn SoundPlayer>, source: SoundSource) -> Self {
        Self {
            player: Some(player),
            source,
        }
    }

    /// Creates a notifier that plays nothing.
    pub fn silent() -> Self {
        Self {
            player: None,
            source: SoundSource::default(),
        }
    }

    /// Returns true if alerts produce sound.
    pub fn is_audible(&self) -> bool {
        self.player
            .as_ref()
            .is_some_and(|player| !player.is_disabled())
    }

    /// Mutes or unmutes the player. Returns true if alerts are now audible.
    ///
    /// A silent notifier has no player and stays silent.
    pub fn toggle_mute(&self) -> bool {
        let Some(player) = self.player.as_ref() else {
            return false;
        };

        if player.is_disabled() {
            player.enable();
        } else {
            player.disable();
        }
        debug!(audible = !player.is_disabled(), "alert sound toggled");
        self.is_audible()
    }

    /// Handles one alert pulse. Returns true if playback started.
    pub fn notify(&self, pulse: u32) -> bool {
        let Some(player) = self.player.as_ref() else {
            debug!(pulse, "alert (silent)");
            return false;
        };
        if player.is_disabled() {
            debug!(pulse, "alert (muted)");
            return false;
        }

        match player.play(&self.source) {
            Ok(()) => {
                debug!(pulse, sound = self.source.name(), "alert played");
                true
            }
            Err(e) => {
                warn!(pulse, "alert playback failed: {}", e);
                false
            }
        }
    }
}

impl std::fmt::Debug for AlertNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertNotifier")
            .field("audible", &self.is_audible())
            .field("source", &self.source)
            .finish()
    }
}
