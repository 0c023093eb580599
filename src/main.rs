// Ici on importe depuis la crate lib complète
use anyhow::Result;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::{env, path::PathBuf};

use newyear_fireworks::audio_engine::{
    AudioCue, AudioCueSettingsBuilder, AudioResource, BufferedAudio,
};
use newyear_fireworks::host::{run_countdown_then_show, HostAudio, HostConfig, HostOutputs};
use newyear_fireworks::physic_engine::PhysicConfig;
use newyear_fireworks::renderer_engine::{RendererConfig, SoftwareCanvas};
use newyear_fireworks::utils::show_rust_core_dependencies;
use newyear_fireworks::FireworksShow;

fn run_show<A: AudioResource>(
    host_config: &HostConfig,
    physic_config: PhysicConfig,
    renderer_config: RendererConfig,
    cue: AudioCue<A>,
    audio: HostAudio,
    outputs: &HostOutputs,
) -> Result<()> {
    let rng = match host_config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut show = FireworksShow::new(physic_config, renderer_config, cue, rng)
        .with_surface(SoftwareCanvas::new(host_config.width, host_config.height));

    let report = run_countdown_then_show(host_config, &mut show, audio, outputs)?;
    info!("Run report:\n{:#?}", report);
    Ok(())
}

/// Main entry point for the New Year fireworks show.
fn main() -> Result<()> {
    env_logger::init();

    info!("🚀 Starting New Year fireworks...");

    show_rust_core_dependencies();

    let physic_config = PhysicConfig::from_file("assets/config/physic.toml").unwrap_or_default();
    info!("Physic config loaded:\n{:#?}", physic_config);
    let renderer_config =
        RendererConfig::from_file("assets/config/renderer.toml").unwrap_or_default();
    let host_config = HostConfig::from_file("assets/config/host.toml").unwrap_or_default();
    info!("Host config loaded:\n{:#?}", host_config);

    // --------------------------
    // Gestion du chemin d'export
    // --------------------------
    let export_dir = env::args()
        .nth(1) // priorité à l'argument CLI
        .map(PathBuf::from)
        .or_else(|| env::var("FIREWORKS_EXPORT_DIR").ok().map(PathBuf::from));

    let outputs = HostOutputs {
        frames_dir: export_dir.clone(),
        soundtrack_path: export_dir.as_ref().map(|dir| dir.join("soundtrack.wav")),
    };
    if let Some(dir) = &export_dir {
        info!("Export directory set to: {}", dir.display());
    }

    // --------------------------
    // Son
    // --------------------------
    let settings = AudioCueSettingsBuilder::default()
        .path(host_config.cue_path.clone())
        .volume(host_config.cue_volume)
        .sample_rate(host_config.sample_rate)
        .build()?;
    let cue_buffer = BufferedAudio::from_file(settings.path(), settings.sample_rate());

    #[cfg(feature = "playback")]
    {
        use newyear_fireworks::audio_engine::{CpalAudio, TickTone};

        if host_config.sound_on {
            // La carte son consomme le tampon : il n'est pas mixé dans l'export WAV.
            let tick = BufferedAudio::from_samples(
                TickTone::default().render(host_config.sample_rate),
                host_config.sample_rate,
            );
            let audio = HostAudio {
                cue_mix: None,
                tick: Some(Box::new(CpalAudio::new(tick))),
            };
            let cue = AudioCue::new(CpalAudio::new(cue_buffer), settings);
            return run_show(
                &host_config,
                physic_config,
                renderer_config,
                cue,
                audio,
                &outputs,
            );
        }
    }

    let audio = HostAudio {
        cue_mix: host_config.sound_on.then(|| cue_buffer.clone()),
        tick: None,
    };
    let cue = AudioCue::new(cue_buffer, settings);
    run_show(
        &host_config,
        physic_config,
        renderer_config,
        cue,
        audio,
        &outputs,
    )
}
