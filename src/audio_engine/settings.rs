// =========================
// Audio Cue Configuration
// =========================

use derive_builder::Builder;

/// Parameters of the celebration sound, usually built through
/// [`AudioCueSettingsBuilder`].
#[derive(Clone, Builder, Debug)]
#[builder(pattern = "owned", build_fn(error = "anyhow::Error"))]
pub struct AudioCueSettings {
    /// WAV file played once when the show starts
    #[builder(default = "\"assets/sounds/crackers.wav\".to_string()", setter(into))]
    path: String,

    /// Playback volume in [0, 1]
    #[builder(default = "0.7")]
    volume: f32,

    /// Output sample rate (the file is resampled to it)
    #[builder(default = "48000")]
    sample_rate: u32,
}

impl AudioCueSettings {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn volume(&self) -> f32 {
        self.volume.clamp(0.0, 1.0)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

impl Default for AudioCueSettings {
    fn default() -> Self {
        Self {
            path: "assets/sounds/crackers.wav".to_string(),
            volume: 0.7,
            sample_rate: 48000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_match_default() {
        let built = AudioCueSettingsBuilder::default().build().unwrap();
        let default = AudioCueSettings::default();
        assert_eq!(built.path(), default.path());
        assert_eq!(built.volume(), default.volume());
        assert_eq!(built.sample_rate(), default.sample_rate());
    }

    #[test]
    fn test_volume_is_clamped() {
        let settings = AudioCueSettingsBuilder::default()
            .volume(3.0)
            .path("x.wav")
            .build()
            .unwrap();
        assert_eq!(settings.volume(), 1.0);
        assert_eq!(settings.path(), "x.wav");
    }
}
