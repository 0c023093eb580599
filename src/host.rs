//! Hôte hors navigateur : compte à rebours, puis spectacle piloté frame par
//! frame sur un [`SoftwareCanvas`], avec export PNG/WAV optionnel.

use log::{debug, info, warn};
use rand::Rng;
use serde::Deserialize;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crate::audio_engine::{AudioResource, BufferedAudio, SafeWavWriter, TickTone};
use crate::countdown::{Countdown, CountdownEvent};
use crate::log_metrics;
use crate::physic_engine::Color;
use crate::profiler::Profiler;
use crate::renderer_engine::{FrameExporter, SoftwareCanvas};
use crate::simulator::{FireworksShow, FrameRequest, ShowStats};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub width: u32,
    pub height: u32,
    pub frame_rate: u32,

    /// Durée du compte à rebours quand aucune cible absolue n'est donnée
    pub countdown_seconds: u64,
    /// Cible absolue (secondes Unix), prise en compte en mode temps réel uniquement
    pub target_unix_secs: Option<u64>,
    pub show_seconds: u64,
    /// Exporte une frame sur `export_every` (0 : aucune)
    pub export_every: u64,
    /// Cadence les frames sur l'horloge murale
    pub realtime: bool,

    pub sound_on: bool,
    pub reduced_motion: bool,
    /// Son de célébration livré dans `assets/sounds/`
    pub cue_path: String,
    pub cue_volume: f32,
    pub sample_rate: u32,
    pub seed: Option<u64>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            frame_rate: 60,
            countdown_seconds: 5,
            target_unix_secs: None,
            show_seconds: 10,
            export_every: 1,
            realtime: false,
            sound_on: true,
            reduced_motion: false,
            cue_path: "assets/sounds/crackers.wav".into(),
            cue_volume: 0.7,
            sample_rate: 48000,
            seed: None,
        }
    }
}

impl HostConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text)?;
        anyhow::ensure!(config.frame_rate > 0, "frame_rate must be > 0");
        anyhow::ensure!(
            config.width > 0 && config.height > 0,
            "viewport must not be empty"
        );
        Ok(config)
    }

    pub fn show_frames(&self) -> u64 {
        self.show_seconds * self.frame_rate as u64
    }

    fn countdown(&self, wall_start: SystemTime) -> Countdown {
        match self.target_unix_secs {
            Some(secs) if self.realtime => {
                return Countdown::new(UNIX_EPOCH + Duration::from_secs(secs));
            }
            Some(_) => warn!("target_unix_secs ignored outside realtime mode"),
            None => {}
        }
        Countdown::starting_at(wall_start, Duration::from_secs(self.countdown_seconds))
    }
}

/// Horloge à pas fixe : chaque `tick()` renvoie l'instant de la frame
/// courante puis avance d'un pas.
#[derive(Debug, Clone)]
pub struct FrameClock {
    step: Duration,
    now: Duration,
    paced: bool,
    origin: Instant,
}

impl FrameClock {
    pub fn new(frame_rate: u32, paced: bool) -> Self {
        Self {
            step: Duration::from_secs(1) / frame_rate.max(1),
            now: Duration::ZERO,
            paced,
            origin: Instant::now(),
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn tick(&mut self) -> Duration {
        let t = self.now;
        if self.paced {
            let deadline = self.origin + t;
            let current = Instant::now();
            if deadline > current {
                thread::sleep(deadline - current);
            }
        }
        self.now += self.step;
        t
    }
}

/// Sources sonores vues par l'hôte.
#[derive(Default)]
pub struct HostAudio {
    /// Poignée partagée sur le son de célébration, mixée dans l'export WAV.
    pub cue_mix: Option<BufferedAudio>,
    /// Lecteur du bip de décompte.
    pub tick: Option<Box<dyn AudioResource>>,
}

#[derive(Debug, Clone, Default)]
pub struct HostOutputs {
    pub frames_dir: Option<PathBuf>,
    pub soundtrack_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub countdown_frames: u64,
    pub pulses: u64,
    pub show_frames: u64,
    pub exported_frames: usize,
    pub soundtrack_frames: u64,
    pub stats: ShowStats,
}

/// Mixe la bande son frame par frame pour l'export WAV.
struct SoundtrackMixer {
    writer: SafeWavWriter,
    cue: Option<BufferedAudio>,
    tick: Vec<[f32; 2]>,
    tick_cursor: Option<usize>,
    sample_rate: u64,
    frame_rate: u64,
    frames: u64,
    written: u64,
}

impl SoundtrackMixer {
    fn start_tick(&mut self) {
        self.tick_cursor = Some(0);
    }

    fn mix_frame(&mut self) -> anyhow::Result<()> {
        self.frames += 1;
        let target = self.frames * self.sample_rate / self.frame_rate;
        let len = (target - self.written) as usize;
        let mut block = vec![[0.0f32; 2]; len];

        if let Some(cue) = &self.cue {
            cue.render_block(&mut block);
        }
        if let Some(cursor) = self.tick_cursor {
            let tail = self.tick.get(cursor..).unwrap_or(&[]);
            for (out, s) in block.iter_mut().zip(tail) {
                out[0] += s[0];
                out[1] += s[1];
            }
            let next = cursor + len;
            self.tick_cursor = (next < self.tick.len()).then_some(next);
        }

        self.written = target;
        self.writer.push_block(block)
    }
}

fn play_tick<P: AudioResource + ?Sized>(player: &mut P) {
    if let Err(e) = player.seek(Duration::ZERO).and_then(|_| player.play()) {
        warn!("Tick sound error: {}", e);
    }
}

/// Compte à rebours puis spectacle de `show_seconds`, arrêté proprement à la fin.
pub fn run_countdown_then_show<A, R>(
    config: &HostConfig,
    show: &mut FireworksShow<SoftwareCanvas, A, R>,
    mut audio: HostAudio,
    outputs: &HostOutputs,
) -> anyhow::Result<RunReport>
where
    A: AudioResource,
    R: Rng,
{
    let mut report = RunReport::default();
    let mut clock = FrameClock::new(config.frame_rate, config.realtime);
    let wall_start = SystemTime::now();
    let mut countdown = config.countdown(wall_start);
    let profiler = Profiler::new(config.frame_rate as usize * 2);

    if show.surface().is_none() {
        show.attach_surface(SoftwareCanvas::new(config.width, config.height));
    }
    show.set_reduced_motion(config.reduced_motion);

    let exporter = match (&outputs.frames_dir, config.export_every) {
        (Some(dir), every) if every > 0 => Some(FrameExporter::new(dir, Color::BLACK)?),
        _ => None,
    };
    let mut mixer = match &outputs.soundtrack_path {
        Some(path) => Some(SoundtrackMixer {
            writer: SafeWavWriter::new(path, config.sample_rate)?,
            cue: audio.cue_mix.take(),
            tick: TickTone::default().render(config.sample_rate),
            tick_cursor: None,
            sample_rate: config.sample_rate as u64,
            frame_rate: config.frame_rate as u64,
            frames: 0,
            written: 0,
        }),
        None => None,
    };

    // --------------------------
    // Compte à rebours
    // --------------------------
    info!("⏳ Countdown: {}", countdown.breakdown(wall_start));
    let show_start = loop {
        let now = clock.tick();
        match countdown.update(wall_start + now) {
            CountdownEvent::Tick(_) => {}
            CountdownEvent::Pulse(remaining) => {
                info!("⏳ {}", remaining);
                report.pulses += 1;
                if config.sound_on {
                    if let Some(player) = audio.tick.as_deref_mut() {
                        play_tick(player);
                    }
                    if let Some(m) = mixer.as_mut() {
                        m.start_tick();
                    }
                }
            }
            CountdownEvent::Celebrate | CountdownEvent::Finished => break now,
        }
        if let Some(m) = mixer.as_mut() {
            m.mix_frame()?;
        }
        report.countdown_frames += 1;
    };

    // --------------------------
    // Spectacle
    // --------------------------
    show.start(show_start)?;
    let log_every = config.frame_rate as u64;
    let mut now = show_start;
    for index in 0..config.show_frames() {
        if index > 0 {
            now = clock.tick();
        }
        let request = {
            let _frame = profiler.frame();
            let _m = profiler.measure("show.frame");
            show.frame(now)
        };
        if request == FrameRequest::Halt {
            break;
        }
        report.show_frames += 1;

        profiler.record_metric("rockets", show.registry().rocket_count());
        profiler.record_metric("particles", show.registry().particle_count());

        if let (Some(exporter), Some(canvas)) = (&exporter, show.surface()) {
            if index % config.export_every == 0 {
                exporter.submit(index, canvas)?;
            }
        }
        if let Some(m) = mixer.as_mut() {
            m.mix_frame()?;
        }
        if (index + 1) % log_every == 0 {
            log_metrics!(profiler);
        }
    }

    report.stats = show.stats();
    show.stop();

    if let Some(exporter) = exporter {
        report.exported_frames = exporter.finish()?;
        debug!("{} frames exported", report.exported_frames);
    }
    if let Some(m) = mixer {
        report.soundtrack_frames = m.writer.finish()?;
    }
    info!(
        "✨ Show finished: {} frames, {} launches, {} bursts",
        report.show_frames,
        report.stats.launches(),
        report.stats.bursts
    );
    Ok(report)
}
