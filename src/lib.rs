// Moteur du spectacle
pub mod simulator;
pub use simulator::{FireworksShow, FrameRequest, ShowError, ShowState, ShowStats};
pub mod timers;
// Renderer engine
pub mod renderer_engine;
pub use renderer_engine::{DrawingSurface, Renderer, SoftwareCanvas};
// Audio engine
pub mod audio_engine;
pub use audio_engine::{AudioCue, AudioCueSettings, AudioResource};
// Physic engine
pub mod physic_engine;
pub use physic_engine::{EffectRegistry, Particle, PhysicConfig, Rocket};

// Compte à rebours & hôte
pub mod countdown;
pub mod host;

// Profiler
pub mod profiler;
// Utilities
pub mod utils;
