// CPAL: cross-platform audio API
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{info, warn};
use std::time::Duration;

use crate::audio_engine::buffered::BufferedAudio;
use crate::audio_engine::r#trait::{AudioError, AudioResource};

/// Lecture d'un [`BufferedAudio`] sur le périphérique de sortie par défaut.
///
/// Le flux cpal est ouvert paresseusement au premier `play()` : sans carte son,
/// seule la lecture échoue (et l'appelant la journalise), pas la construction.
pub struct CpalAudio {
    buffer: BufferedAudio,
    stream: Option<cpal::Stream>,
}

impl CpalAudio {
    pub fn new(buffer: BufferedAudio) -> Self {
        Self {
            buffer,
            stream: None,
        }
    }

    pub fn buffer(&self) -> &BufferedAudio {
        &self.buffer
    }

    fn ensure_stream(&mut self) -> Result<(), AudioError> {
        if self.stream.is_some() {
            return Ok(());
        }

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoDevice)?;

        let config = cpal::StreamConfig {
            channels: 2,
            sample_rate: cpal::SampleRate(self.buffer.sample_rate()),
            buffer_size: cpal::BufferSize::Default,
        };

        let source = self.buffer.clone();
        let mut scratch: Vec<[f32; 2]> = Vec::new();

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let frames = data.len() / 2;
                    scratch.clear();
                    scratch.resize(frames, [0.0; 2]);
                    source.render_block(&mut scratch);
                    for (out, s) in data.chunks_exact_mut(2).zip(&scratch) {
                        out[0] = s[0].clamp(-1.0, 1.0);
                        out[1] = s[1].clamp(-1.0, 1.0);
                    }
                },
                move |err| warn!("CPAL error: {}", err),
                None,
            )
            .map_err(|e| AudioError::StreamBuildFailed(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamPlayFailed(e.to_string()))?;

        info!("🔊 Audio output stream started");
        self.stream = Some(stream);
        Ok(())
    }
}

impl AudioResource for CpalAudio {
    fn load(&mut self) -> Result<(), AudioError> {
        self.buffer.load()
    }

    fn play(&mut self) -> Result<(), AudioError> {
        self.buffer.play()?;
        self.ensure_stream()
    }

    fn pause(&mut self) -> Result<(), AudioError> {
        self.buffer.pause()
    }

    fn seek(&mut self, position: Duration) -> Result<(), AudioError> {
        self.buffer.seek(position)
    }

    fn set_volume(&mut self, volume: f32) {
        self.buffer.set_volume(volume);
    }

    fn is_paused(&self) -> bool {
        self.buffer.is_paused()
    }

    fn position(&self) -> Duration {
        self.buffer.position()
    }
}
