use log::{debug, error, info, warn};
use rand::Rng;
use std::fmt;
use std::time::Duration;

use crate::audio_engine::{AudioCue, AudioResource};
use crate::physic_engine::{
    EffectRegistry, LaunchPolicy, ParticleStatus, PhysicConfig, Rocket, RocketStatus, Vec2,
    Viewport, DEFAULT_PALETTE,
};
use crate::renderer_engine::{DrawingSurface, Renderer, RendererConfig};
use crate::timers::TimerQueue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowState {
    #[default]
    Stopped,
    Running,
}

/// Réponse de `frame()` : l'hôte doit-il planifier une nouvelle frame ?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRequest {
    Continue,
    Halt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowError {
    /// Aucune surface de dessin attachée au moment du démarrage.
    SurfaceUnavailable,
}

impl fmt::Display for ShowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShowError::SurfaceUnavailable => write!(f, "no drawing surface available"),
        }
    }
}

impl std::error::Error for ShowError {}

/// Tâches différées exécutées par le moteur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowTask {
    VolleyLaunch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LaunchKind {
    Manual,
    Auto,
    Volley,
}

/// Compteurs depuis le dernier `start()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShowStats {
    pub frames: u64,
    pub manual_launches: u64,
    pub auto_launches: u64,
    pub volley_launches: u64,
    pub bursts: u64,
}

impl ShowStats {
    pub fn launches(&self) -> u64 {
        self.manual_launches + self.auto_launches + self.volley_launches
    }
}

/// Moteur du feu d'artifice : possède la surface, les effets actifs, le son,
/// le générateur aléatoire et les timers.
///
/// L'hôte appelle `frame(now)` tant qu'elle renvoie [`FrameRequest::Continue`].
/// Tout le travail (timers compris) s'exécute dans ces appels, sur un seul thread.
pub struct FireworksShow<S, A, R>
where
    S: DrawingSurface,
    A: AudioResource,
    R: Rng,
{
    surface: Option<S>,
    registry: EffectRegistry,
    renderer: Renderer,
    physic_config: PhysicConfig,
    policy: LaunchPolicy,
    cue: AudioCue<A>,
    rng: R,
    timers: TimerQueue<ShowTask>,
    state: ShowState,
    reduced_motion: bool,
    viewport: Viewport,
    stats: ShowStats,
}

impl<S, A, R> FireworksShow<S, A, R>
where
    S: DrawingSurface,
    A: AudioResource,
    R: Rng,
{
    /// Une configuration invalide est signalée mais pas rejetée ; seule une
    /// palette vide est remplacée par [`DEFAULT_PALETTE`].
    pub fn new(
        mut physic_config: PhysicConfig,
        renderer_config: RendererConfig,
        cue: AudioCue<A>,
        rng: R,
    ) -> Self {
        if let Err(e) = physic_config.validate() {
            warn!("⚠️ Invalid physic config: {}", e);
        }
        if physic_config.palette.is_empty() {
            physic_config.palette = DEFAULT_PALETTE.to_vec();
        }
        let policy = LaunchPolicy::from(&physic_config);
        Self {
            surface: None,
            registry: EffectRegistry::new(),
            renderer: Renderer::new(renderer_config),
            physic_config,
            policy,
            cue,
            rng,
            timers: TimerQueue::new(),
            state: ShowState::Stopped,
            reduced_motion: false,
            viewport: Viewport::default(),
            stats: ShowStats::default(),
        }
    }

    pub fn with_surface(mut self, surface: S) -> Self {
        self.attach_surface(surface);
        self
    }

    // ------------------------------------------------------------------
    // Cycle de vie
    // ------------------------------------------------------------------

    /// Démarre (ou redémarre) le spectacle à l'instant `now` de l'horloge hôte.
    pub fn start(&mut self, now: Duration) -> Result<(), ShowError> {
        let Some(surface) = self.surface.as_ref() else {
            error!("❌ Cannot start fireworks: {}", ShowError::SurfaceUnavailable);
            return Err(ShowError::SurfaceUnavailable);
        };
        self.viewport = Viewport::from(surface.size());

        if self.state == ShowState::Running {
            warn!("Fireworks show already running, restarting");
        }

        self.registry.clear();
        self.timers.cancel_all();
        self.stats = ShowStats::default();
        self.state = ShowState::Running;
        info!(
            "🎆 Starting fireworks show ({} x {})",
            self.viewport.width, self.viewport.height
        );

        self.cue.play();

        let volley = self.physic_config.opening_volley_size;
        if volley > 0 {
            self.launch_random(LaunchKind::Volley);
        }
        let interval = Duration::from_millis(self.physic_config.opening_volley_interval_ms);
        for i in 1..volley as u32 {
            self.timers.schedule(now + interval * i, ShowTask::VolleyLaunch);
        }
        Ok(())
    }

    /// Arrête le spectacle et efface la surface. Sans effet supplémentaire si
    /// le spectacle est déjà arrêté.
    pub fn stop(&mut self) {
        if self.state == ShowState::Running {
            info!(
                "🛑 Stopping fireworks ({} frames, {} launches, {} bursts)",
                self.stats.frames,
                self.stats.launches(),
                self.stats.bursts
            );
        }
        self.state = ShowState::Stopped;

        let cancelled = self.timers.cancel_all();
        if cancelled > 0 {
            debug!("Cancelled {} pending timers", cancelled);
        }
        self.cue.stop();
        self.registry.clear();
        if let Some(surface) = self.surface.as_mut() {
            self.renderer.clear(surface);
        }
    }

    /// Une frame d'animation.
    pub fn frame(&mut self, now: Duration) -> FrameRequest {
        if self.state != ShowState::Running {
            return FrameRequest::Halt;
        }
        self.stats.frames += 1;

        for task in self.timers.drain_due(now) {
            match task {
                ShowTask::VolleyLaunch => self.launch_random(LaunchKind::Volley),
            }
        }

        if let Some(surface) = self.surface.as_mut() {
            self.renderer.fade_pass(surface);
        }

        if !self.reduced_motion && self.policy.should_auto_launch(&mut self.rng) {
            self.launch_random(LaunchKind::Auto);
        }

        self.step_rockets();
        self.step_particles();

        FrameRequest::Continue
    }

    fn step_rockets(&mut self) {
        for i in (0..self.registry.rocket_count()).rev() {
            let Some(rocket) = self.registry.rocket_mut(i) else {
                continue;
            };
            if let Some(surface) = self.surface.as_mut() {
                self.renderer.draw(&*rocket, surface, &mut self.rng);
            }
            if rocket.advance() == RocketStatus::Arrived {
                let target = rocket.target();
                self.registry.remove_rocket(i);
                self.registry.spawn_burst(
                    target,
                    self.physic_config.particle_count,
                    &self.physic_config,
                    &mut self.rng,
                );
                self.stats.bursts += 1;
                debug!("💥 Burst at ({:.0}, {:.0})", target.x, target.y);
            }
        }
    }

    fn step_particles(&mut self) {
        for i in (0..self.registry.particle_count()).rev() {
            let Some(particle) = self.registry.particle_mut(i) else {
                continue;
            };
            if let Some(surface) = self.surface.as_mut() {
                self.renderer.draw(&*particle, surface, &mut self.rng);
            }
            if particle.advance() == ParticleStatus::Expired {
                self.registry.remove_particle(i);
            }
        }
    }

    // ------------------------------------------------------------------
    // Lancements
    // ------------------------------------------------------------------

    /// Lance une fusée aléatoire. Sans effet si le spectacle est arrêté.
    pub fn launch_one(&mut self) {
        self.launch_random(LaunchKind::Manual);
    }

    /// Lance une fusée entre deux points donnés. Sans effet si le spectacle est arrêté.
    pub fn launch_rocket(&mut self, origin: Vec2, target: Vec2) {
        self.launch(origin, target, LaunchKind::Manual);
    }

    fn launch_random(&mut self, kind: LaunchKind) {
        if self.state != ShowState::Running {
            return;
        }
        let (origin, target) = self.policy.pick(self.viewport, &mut self.rng);
        self.launch(origin, target, kind);
    }

    fn launch(&mut self, origin: Vec2, target: Vec2, kind: LaunchKind) {
        if self.state != ShowState::Running {
            return;
        }
        let id = self
            .registry
            .push_rocket(Rocket::new(origin, target, &self.physic_config));
        debug!(
            "🚀 Rocket #{} ({:?}) ({:.0}, {:.0}) -> ({:.0}, {:.0})",
            id, kind, origin.x, origin.y, target.x, target.y
        );
        match kind {
            LaunchKind::Manual => self.stats.manual_launches += 1,
            LaunchKind::Auto => self.stats.auto_launches += 1,
            LaunchKind::Volley => self.stats.volley_launches += 1,
        }
    }

    // ------------------------------------------------------------------
    // Surface & options
    // ------------------------------------------------------------------

    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(width, height);
        }
        self.viewport = Viewport::from((width, height));
        debug!("🖥️ Surface resized: {} x {}", width, height);
    }

    /// Attache une surface ; renvoie la précédente le cas échéant.
    pub fn attach_surface(&mut self, surface: S) -> Option<S> {
        self.viewport = Viewport::from(surface.size());
        self.surface.replace(surface)
    }

    pub fn detach_surface(&mut self) -> Option<S> {
        self.surface.take()
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    // ------------------------------------------------------------------
    // Accesseurs
    // ------------------------------------------------------------------

    pub fn state(&self) -> ShowState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ShowState::Running
    }

    pub fn registry(&self) -> &EffectRegistry {
        &self.registry
    }

    pub fn stats(&self) -> ShowStats {
        self.stats
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn physic_config(&self) -> &PhysicConfig {
        &self.physic_config
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn audio_cue(&self) -> &AudioCue<A> {
        &self.cue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio_engine::{AudioCueSettings, BufferedAudio};
    use crate::renderer_engine::{CompositeOperation, DrawCommand, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    type TestShow = FireworksShow<RecordingSurface, BufferedAudio, StdRng>;

    fn quiet_config() -> PhysicConfig {
        PhysicConfig {
            auto_launch_probability: 0.0,
            opening_volley_size: 0,
            ..PhysicConfig::default()
        }
    }

    fn show(config: PhysicConfig) -> TestShow {
        let cue = AudioCue::new(
            BufferedAudio::from_samples(vec![[0.2, 0.2]; 480], 48000),
            AudioCueSettings::default(),
        );
        FireworksShow::new(
            config,
            RendererConfig::default(),
            cue,
            StdRng::seed_from_u64(7),
        )
        .with_surface(RecordingSurface::new(800, 600))
    }

    #[test]
    fn test_start_without_surface_fails() {
        let cue = AudioCue::new(
            BufferedAudio::from_samples(vec![], 48000),
            AudioCueSettings::default(),
        );
        let mut show: TestShow = FireworksShow::new(
            PhysicConfig::default(),
            RendererConfig::default(),
            cue,
            StdRng::seed_from_u64(1),
        );

        assert_eq!(show.start(Duration::ZERO), Err(ShowError::SurfaceUnavailable));
        assert_eq!(show.state(), ShowState::Stopped);
        assert_eq!(show.frame(Duration::ZERO), FrameRequest::Halt);
    }

    #[test]
    fn test_start_launches_opening_volley() {
        let mut show = show(PhysicConfig {
            auto_launch_probability: 0.0,
            ..PhysicConfig::default()
        });
        show.start(Duration::from_secs(3)).unwrap();

        assert!(show.is_running());
        assert!(show.audio_cue().is_playing());
        assert_eq!(show.registry().rocket_count(), 1);
        assert_eq!(show.pending_timers(), 3);

        show.frame(Duration::from_millis(3399));
        assert_eq!(show.stats().volley_launches, 1);
        show.frame(Duration::from_millis(3400));
        assert_eq!(show.stats().volley_launches, 2);
        show.frame(Duration::from_millis(4200));
        assert_eq!(show.stats().volley_launches, 4);
        assert_eq!(show.pending_timers(), 0);
    }

    #[test]
    fn test_frame_starts_with_fade_pass() {
        let mut show = show(quiet_config());
        show.start(Duration::ZERO).unwrap();
        show.launch_rocket(Vec2::new(400.0, 600.0), Vec2::new(400.0, 100.0));
        show.frame(Duration::ZERO);

        let surface = show.surface().unwrap();
        assert_eq!(
            surface.commands[0],
            DrawCommand::SetComposite(CompositeOperation::DestinationOut)
        );
        assert!(matches!(surface.commands[1], DrawCommand::FillRect { .. }));
        assert_eq!(
            surface.commands[2],
            DrawCommand::SetComposite(CompositeOperation::SourceOver)
        );
        assert!(matches!(surface.commands[3], DrawCommand::StrokeLine { .. }));
        assert!(matches!(surface.commands[4], DrawCommand::FillCircle { .. }));
    }

    #[test]
    fn test_launches_are_ignored_when_stopped() {
        let mut show = show(quiet_config());
        show.launch_one();
        show.launch_rocket(Vec2::ZERO, Vec2::ONE);
        assert!(show.registry().is_empty());
        assert_eq!(show.stats().launches(), 0);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut show = show(quiet_config());
        show.start(Duration::ZERO).unwrap();
        show.launch_one();
        show.launch_one();
        show.frame(Duration::ZERO);

        show.start(Duration::from_secs(1)).unwrap();
        assert!(show.registry().is_empty());
        assert_eq!(show.stats(), ShowStats::default());
        assert!(show.is_running());
    }

    #[test]
    fn test_resize_updates_viewport() {
        let mut show = show(quiet_config());
        show.resize(1024, 768);
        assert_eq!(show.viewport(), Viewport::new(1024.0, 768.0));
        assert_eq!(show.surface().unwrap().size(), (1024, 768));
    }
}
