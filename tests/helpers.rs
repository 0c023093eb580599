use newyear_fireworks::audio_engine::{AudioCue, AudioCueSettings, AudioError, AudioResource};
use newyear_fireworks::physic_engine::{PhysicConfig, Vec2};
use newyear_fireworks::renderer_engine::{CompositeOperation, DrawingSurface, RendererConfig, Rgba};
use newyear_fireworks::FireworksShow;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Ressource audio factice : journalise les appels, peut échouer sur commande.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockAudio {
    pub log: Rc<RefCell<Vec<String>>>,
    pub fail: bool,
    paused: bool,
    position: Duration,
}

#[allow(dead_code)]
impl MockAudio {
    pub fn new(log: Rc<RefCell<Vec<String>>>) -> Self {
        Self {
            log,
            paused: true,
            ..Default::default()
        }
    }

    pub fn failing(log: Rc<RefCell<Vec<String>>>) -> Self {
        Self {
            fail: true,
            ..Self::new(log)
        }
    }

    fn call(&self, name: &str) -> Result<(), AudioError> {
        self.log.borrow_mut().push(format!("audio.{}", name));
        if self.fail {
            Err(AudioError::NoDevice)
        } else {
            Ok(())
        }
    }
}

impl AudioResource for MockAudio {
    fn load(&mut self) -> Result<(), AudioError> {
        self.call("load")
    }

    fn play(&mut self) -> Result<(), AudioError> {
        self.call("play")?;
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), AudioError> {
        self.call("pause")?;
        self.paused = true;
        Ok(())
    }

    fn seek(&mut self, position: Duration) -> Result<(), AudioError> {
        self.call("seek")?;
        self.position = position;
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.log.borrow_mut().push(format!("audio.volume({:.1})", volume));
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn position(&self) -> Duration {
        self.position
    }
}

/// Surface qui ne dessine rien (tests de pure simulation).
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct NullSurface {
    pub width: u32,
    pub height: u32,
    pub clears: usize,
}

#[allow(dead_code)]
impl NullSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            clears: 0,
        }
    }
}

impl DrawingSurface for NullSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
    fn clear_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32) {
        self.clears += 1;
    }
    fn set_composite_operation(&mut self, _op: CompositeOperation) {}
    fn composite_operation(&self) -> CompositeOperation {
        CompositeOperation::SourceOver
    }
    fn set_global_alpha(&mut self, _alpha: f32) {}
    fn global_alpha(&self) -> f32 {
        1.0
    }
    fn fill_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32, _style: Rgba) {}
    fn stroke_line(&mut self, _from: Vec2, _to: Vec2, _style: Rgba, _width: f32) {}
    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _style: Rgba) {}
}

/// Configuration sans lancement spontané ni salve d'ouverture.
#[allow(dead_code)]
pub fn quiet_config() -> PhysicConfig {
    PhysicConfig {
        auto_launch_probability: 0.0,
        opening_volley_size: 0,
        ..PhysicConfig::default()
    }
}

#[allow(dead_code)]
pub type MockShow<S> = FireworksShow<S, MockAudio, StdRng>;

#[allow(dead_code)]
pub fn mock_show<S: DrawingSurface>(
    surface: S,
    config: PhysicConfig,
    seed: u64,
) -> (MockShow<S>, Rc<RefCell<Vec<String>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let cue = AudioCue::new(MockAudio::new(log.clone()), AudioCueSettings::default());
    let show = FireworksShow::new(
        config,
        RendererConfig::default(),
        cue,
        StdRng::seed_from_u64(seed),
    )
    .with_surface(surface);
    (show, log)
}

/// Instant de la frame `n` à 60 FPS.
#[allow(dead_code)]
pub fn frame_time(n: u64) -> Duration {
    Duration::from_secs(1) / 60 * n as u32
}
