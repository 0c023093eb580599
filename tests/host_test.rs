use newyear_fireworks::audio_engine::{AudioCue, AudioCueSettings, BufferedAudio};
use newyear_fireworks::host::{run_countdown_then_show, HostAudio, HostConfig, HostOutputs};
use newyear_fireworks::physic_engine::PhysicConfig;
use newyear_fireworks::renderer_engine::{RendererConfig, SoftwareCanvas};
use newyear_fireworks::{DrawingSurface, FireworksShow, ShowState};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn host_config() -> HostConfig {
    HostConfig {
        width: 160,
        height: 120,
        frame_rate: 30,
        countdown_seconds: 1,
        show_seconds: 1,
        export_every: 10,
        seed: Some(1),
        ..HostConfig::default()
    }
}

#[test]
fn test_countdown_then_show_exports_frames_and_soundtrack() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = host_config();

    let cue_buffer = BufferedAudio::from_samples(vec![[0.3, 0.3]; 4800], config.sample_rate);
    let cue = AudioCue::new(cue_buffer.clone(), AudioCueSettings::default());
    let mut show = FireworksShow::new(
        PhysicConfig::default(),
        RendererConfig::default(),
        cue,
        StdRng::seed_from_u64(1),
    )
    .with_surface(SoftwareCanvas::new(config.width, config.height));

    let outputs = HostOutputs {
        frames_dir: Some(dir.path().join("frames")),
        soundtrack_path: Some(dir.path().join("show.wav")),
    };
    let audio = HostAudio {
        cue_mix: Some(cue_buffer.clone()),
        tick: None,
    };

    let report = run_countdown_then_show(&config, &mut show, audio, &outputs)?;

    // 1 s de décompte : une seule impulsion (1 -> 0)
    assert_eq!(report.pulses, 1);
    assert!(report.countdown_frames >= 30);
    assert_eq!(report.show_frames, 30);
    assert_eq!(report.stats.frames, 30);
    assert!(report.stats.volley_launches >= 3);

    // frames 0, 10 et 20
    assert_eq!(report.exported_frames, 3);
    for index in [0, 10, 20] {
        assert!(dir
            .path()
            .join("frames")
            .join(format!("frame_{:06}.png", index))
            .exists());
    }

    let expected = (report.countdown_frames + report.show_frames) * 48000 / 30;
    assert_eq!(report.soundtrack_frames, expected);
    let mut reader = hound::WavReader::open(dir.path().join("show.wav"))?;
    assert_eq!(reader.duration() as u64, expected);

    // bip du décompte puis son de célébration, mixés après le début du spectacle
    let samples: Vec<i16> = reader.samples::<i16>().collect::<Result<_, _>>()?;
    let show_start = (report.countdown_frames * 48000 / 30 * 2) as usize;
    assert!(samples[..show_start].iter().any(|s| *s != 0));
    assert!(samples[show_start..].iter().any(|s| *s != 0));

    assert_eq!(show.state(), ShowState::Stopped);
    assert!(show.surface().unwrap().is_clear());
    Ok(())
}

#[test]
fn test_host_without_outputs() -> anyhow::Result<()> {
    let config = HostConfig {
        countdown_seconds: 0,
        ..host_config()
    };
    let cue = AudioCue::new(
        BufferedAudio::from_samples(vec![], 48000),
        AudioCueSettings::default(),
    );
    let mut show: FireworksShow<SoftwareCanvas, _, _> = FireworksShow::new(
        PhysicConfig::default(),
        RendererConfig::default(),
        cue,
        StdRng::seed_from_u64(2),
    );

    let report =
        run_countdown_then_show(&config, &mut show, HostAudio::default(), &HostOutputs::default())?;
    assert_eq!(report.countdown_frames, 0);
    assert_eq!(report.pulses, 0);
    assert_eq!(report.show_frames, 30);
    assert_eq!(report.exported_frames, 0);
    assert_eq!(report.soundtrack_frames, 0);
    // la surface manquante a été créée par l'hôte
    assert_eq!(show.surface().map(|s| s.size()), Some((160, 120)));
    Ok(())
}
