use std::path::Path;

use raylib::prelude::*;
use tracing::{debug, warn};

/// A one-shot sound that can be fired again while still playing.
pub trait CuePlayer {
    /// Plays the cue from its first sample, cutting off any play in flight.
    fn restart(&mut self);
}

/// Cue backed by a raylib `Sound`, loaded once when a screen mounts. The
/// `Sound` unloads itself when the screen is dropped. Without an audio device
/// or a readable file the cue stays silent.
pub struct SoundCue<'aud> {
    sound: Option<Sound<'aud>>,
}

impl<'aud> SoundCue<'aud> {
    pub fn load(audio: Option<&'aud RaylibAudio>, path: &Path) -> Self {
        let Some(audio) = audio else {
            return Self { sound: None };
        };

        let sound = match path.to_str() {
            Some(file) => match audio.new_sound(file) {
                Ok(sound) => {
                    debug!(path = %path.display(), "loaded cue sound");
                    Some(sound)
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "cue sound unavailable, continuing silently");
                    None
                }
            },
            None => {
                warn!(path = %path.display(), "cue sound path is not valid UTF-8");
                None
            }
        };
        Self { sound }
    }

    pub fn is_loaded(&self) -> bool {
        self.sound.is_some()
    }
}

impl CuePlayer for SoundCue<'_> {
    fn restart(&mut self) {
        if let Some(sound) = &self.sound {
            sound.stop();
            sound.play();
        }
    }
}
