use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::audio_engine::audio_loading::load_audio;
use crate::audio_engine::r#trait::{AudioError, AudioResource};

/// État de lecture partagé entre le thread de contrôle et le consommateur
/// (callback du périphérique audio ou export WAV).
#[derive(Debug, Default)]
pub struct PlaybackState {
    samples: Vec<[f32; 2]>,
    cursor: usize,
    volume: f32,
    playing: bool,
}

/// Ressource audio en mémoire : échantillons stéréo décodés + curseur de lecture.
///
/// Les clones partagent le même état, ce qui permet de garder une poignée
/// côté moteur et une autre dans le callback de sortie.
#[derive(Debug, Clone)]
pub struct BufferedAudio {
    source: Option<PathBuf>,
    sample_rate: u32,
    state: Arc<Mutex<PlaybackState>>,
}

impl BufferedAudio {
    /// Ressource adossée à un fichier WAV, décodé au premier [`AudioResource::load`].
    pub fn from_file(path: impl Into<PathBuf>, sample_rate: u32) -> Self {
        Self {
            source: Some(path.into()),
            sample_rate,
            state: Arc::new(Mutex::new(PlaybackState {
                volume: 1.0,
                ..PlaybackState::default()
            })),
        }
    }

    /// Ressource déjà chargée (son synthétisé, tests).
    pub fn from_samples(samples: Vec<[f32; 2]>, sample_rate: u32) -> Self {
        Self {
            source: None,
            sample_rate,
            state: Arc::new(Mutex::new(PlaybackState {
                samples,
                volume: 1.0,
                ..PlaybackState::default()
            })),
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn is_loaded(&self) -> bool {
        self.lock().map(|s| !s.samples.is_empty()).unwrap_or(false)
    }

    pub fn is_playing(&self) -> bool {
        self.lock().map(|s| s.playing).unwrap_or(false)
    }

    pub fn duration(&self) -> Duration {
        let frames = self.lock().map(|s| s.samples.len()).unwrap_or(0);
        self.frames_to_duration(frames)
    }

    /// Ajoute (mixe) les prochains échantillons dans `out` et avance le curseur.
    ///
    /// Renvoie le nombre de frames produites ; 0 si la ressource est en pause.
    /// En fin de tampon la lecture s'arrête d'elle-même.
    pub fn render_block(&self, out: &mut [[f32; 2]]) -> usize {
        let Ok(mut state) = self.state.lock() else {
            return 0;
        };
        if !state.playing {
            return 0;
        }

        let start = state.cursor;
        let n = state.samples.len().saturating_sub(start).min(out.len());
        let volume = state.volume;
        for (acc, s) in out.iter_mut().zip(&state.samples[start..start + n]) {
            acc[0] += s[0] * volume;
            acc[1] += s[1] * volume;
        }

        state.cursor += n;
        if state.cursor >= state.samples.len() {
            state.playing = false;
        }
        n
    }

    fn lock(&self) -> Result<MutexGuard<'_, PlaybackState>, AudioError> {
        self.state.lock().map_err(|_| AudioError::Poisoned)
    }

    fn frames_to_duration(&self, frames: usize) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(frames as f64 / self.sample_rate as f64)
    }
}

impl AudioResource for BufferedAudio {
    fn load(&mut self) -> Result<(), AudioError> {
        let Some(path) = &self.source else {
            return Ok(());
        };
        let samples = load_audio(path, self.sample_rate)?;
        let mut state = self.lock()?;
        state.samples = samples;
        state.cursor = 0;
        Ok(())
    }

    fn play(&mut self) -> Result<(), AudioError> {
        let mut state = self.lock()?;
        if state.samples.is_empty() {
            return Err(AudioError::NotLoaded);
        }
        if state.cursor >= state.samples.len() {
            state.cursor = 0;
        }
        state.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), AudioError> {
        self.lock()?.playing = false;
        Ok(())
    }

    fn seek(&mut self, position: Duration) -> Result<(), AudioError> {
        let rate = self.sample_rate as f64;
        let mut state = self.lock()?;
        let frame = (position.as_secs_f64() * rate) as usize;
        state.cursor = frame.min(state.samples.len());
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        if let Ok(mut state) = self.lock() {
            state.volume = volume.clamp(0.0, 1.0);
        }
    }

    fn is_paused(&self) -> bool {
        !self.is_playing()
    }

    fn position(&self) -> Duration {
        let cursor = self.lock().map(|s| s.cursor).unwrap_or(0);
        self.frames_to_duration(cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<[f32; 2]> {
        (0..n).map(|i| [i as f32, -(i as f32)]).collect()
    }

    #[test]
    fn test_paused_resource_renders_nothing() {
        let audio = BufferedAudio::from_samples(ramp(10), 10);
        let mut out = vec![[0.0; 2]; 4];
        assert_eq!(audio.render_block(&mut out), 0);
        assert!(out.iter().all(|s| *s == [0.0, 0.0]));
    }

    #[test]
    fn test_play_seek_and_mix() {
        let mut audio = BufferedAudio::from_samples(ramp(10), 10);
        audio.set_volume(0.5);
        audio.seek(Duration::from_millis(800)).unwrap();
        audio.play().unwrap();

        let mut out = vec![[1.0, 1.0]; 4];
        assert_eq!(audio.render_block(&mut out), 2);
        assert_eq!(out[0], [1.0 + 4.0, 1.0 - 4.0]);
        assert_eq!(out[1], [1.0 + 4.5, 1.0 - 4.5]);
        assert_eq!(out[2], [1.0, 1.0]);

        // fin du tampon : la lecture s'arrête
        assert!(audio.is_paused());
        assert_eq!(audio.position(), Duration::from_secs(1));
    }

    #[test]
    fn test_empty_resource_cannot_play() {
        let mut audio = BufferedAudio::from_samples(Vec::new(), 48000);
        assert!(matches!(audio.play(), Err(AudioError::NotLoaded)));
    }

    #[test]
    fn test_missing_file_fails_to_load() {
        let mut audio = BufferedAudio::from_file("nope/crackers.wav", 48000);
        assert!(audio.load().is_err());
        assert!(!audio.is_loaded());
    }
}
