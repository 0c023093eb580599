use std::fmt;
use std::time::Duration;

/// Erreurs d'une ressource audio (chargement, lecture, périphérique)
#[derive(Debug)]
pub enum AudioError {
    Decode(hound::Error),
    NotLoaded,
    NoDevice,
    StreamBuildFailed(String),
    StreamPlayFailed(String),
    Poisoned,
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::Decode(e) => write!(f, "Failed to decode audio file: {}", e),
            AudioError::NotLoaded => write!(f, "Audio resource has no samples loaded"),
            AudioError::NoDevice => write!(f, "No audio output device available"),
            AudioError::StreamBuildFailed(e) => write!(f, "Failed to build audio stream: {}", e),
            AudioError::StreamPlayFailed(e) => write!(f, "Failed to start audio stream: {}", e),
            AudioError::Poisoned => write!(f, "Audio playback state lock poisoned"),
        }
    }
}

impl std::error::Error for AudioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AudioError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<hound::Error> for AudioError {
    fn from(e: hound::Error) -> Self {
        AudioError::Decode(e)
    }
}

/// Ressource audio jouable (équivalent d'un élément `<audio>`).
pub trait AudioResource {
    fn load(&mut self) -> Result<(), AudioError>;
    fn play(&mut self) -> Result<(), AudioError>;
    fn pause(&mut self) -> Result<(), AudioError>;
    fn seek(&mut self, position: Duration) -> Result<(), AudioError>;
    fn set_volume(&mut self, volume: f32);

    fn is_paused(&self) -> bool;
    fn position(&self) -> Duration;
}
