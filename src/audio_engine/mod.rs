pub mod r#trait;
pub use r#trait::{AudioError, AudioResource};

pub mod settings;
pub use settings::{AudioCueSettings, AudioCueSettingsBuilder};

pub mod audio_loading;
pub use audio_loading::{load_audio, resample_linear};

pub mod buffered;
pub use buffered::BufferedAudio;

#[cfg(feature = "playback")]
pub mod cpal_player;
#[cfg(feature = "playback")]
pub use cpal_player::CpalAudio;

pub mod audio_cue;
pub use audio_cue::AudioCue;

pub mod tone;
pub use tone::TickTone;

pub mod safewavwriter;
pub use safewavwriter::SafeWavWriter;
