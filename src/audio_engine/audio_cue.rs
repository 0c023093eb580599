use log::{debug, warn};
use std::time::Duration;

use crate::audio_engine::r#trait::AudioResource;
use crate::audio_engine::settings::AudioCueSettings;

/// Son de célébration joué une fois par lancement du spectacle.
///
/// Le son est décoratif : toutes les erreurs de la ressource sont journalisées
/// puis ignorées, elles n'affectent jamais la simulation.
pub struct AudioCue<A: AudioResource> {
    resource: A,
    settings: AudioCueSettings,
    playing: bool,
}

impl<A: AudioResource> AudioCue<A> {
    /// Crée le cue et précharge la ressource.
    pub fn new(mut resource: A, settings: AudioCueSettings) -> Self {
        if let Err(e) = resource.load() {
            warn!("Sound preload error: {}", e);
        }
        Self {
            resource,
            settings,
            playing: false,
        }
    }

    /// Joue le son depuis le début, sauf s'il a déjà été déclenché.
    pub fn play(&mut self) {
        if self.playing {
            return;
        }
        self.playing = true;

        if let Err(e) = self.resource.seek(Duration::ZERO) {
            warn!("Audio rewind error: {}", e);
        }
        self.resource.set_volume(self.settings.volume());
        match self.resource.play() {
            Ok(()) => debug!("🔊 Celebration sound started"),
            Err(e) => warn!("Audio play error: {}", e),
        }
    }

    /// Met en pause, rembobine et réarme le cue.
    pub fn stop(&mut self) {
        if let Err(e) = self.resource.pause() {
            warn!("Audio pause error: {}", e);
        }
        if let Err(e) = self.resource.seek(Duration::ZERO) {
            warn!("Audio rewind error: {}", e);
        }
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn settings(&self) -> &AudioCueSettings {
        &self.settings
    }

    pub fn resource(&self) -> &A {
        &self.resource
    }

    pub fn resource_mut(&mut self) -> &mut A {
        &mut self.resource
    }
}
