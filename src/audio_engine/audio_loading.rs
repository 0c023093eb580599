// =========================
// Audio File Loading
// =========================
use hound::{SampleFormat, WavReader};
use std::path::Path;

use crate::audio_engine::r#trait::AudioError;

/// Charge un fichier WAV en tampon stéréo `[f32; 2]` au taux `target_rate`.
///
/// - fichiers mono (dupliqués sur les deux canaux) ou multi-canaux (deux premiers canaux)
/// - échantillons entiers 8 à 32 bits normalisés dans [-1.0, 1.0], ou flottants
/// - rééchantillonnage linéaire vers `target_rate`
pub fn load_audio(path: impl AsRef<Path>, target_rate: u32) -> Result<Vec<[f32; 2]>, AudioError> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        SampleFormat::Int => {
            let scale = (1_i64 << (spec.bits_per_sample.clamp(1, 32) - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()?
        }
    };

    let data: Vec<[f32; 2]> = samples
        .chunks_exact(channels)
        .map(|frame| {
            let l = frame[0];
            let r = if channels > 1 { frame[1] } else { frame[0] };
            [l, r]
        })
        .collect();

    Ok(resample_linear(&data, spec.sample_rate, target_rate))
}

/// Resample audio linearly from src_sr → dst_sr
pub fn resample_linear(data: &[[f32; 2]], src_sr: u32, dst_sr: u32) -> Vec<[f32; 2]> {
    if src_sr == dst_sr || data.len() < 2 || src_sr == 0 || dst_sr == 0 {
        return data.to_owned();
    }

    let n_samples = data.len();
    let new_len = ((n_samples as f64) * (dst_sr as f64 / src_sr as f64)).ceil() as usize;
    if new_len < 2 {
        return data[..1].to_owned();
    }
    let mut out = Vec::with_capacity(new_len);

    for i in 0..new_len {
        let pos = (i as f64) * (n_samples as f64 - 1.0) / (new_len as f64 - 1.0);
        let idx = pos.floor() as usize;
        let frac = (pos - idx as f64) as f32;

        let s0 = data[idx];
        let s1 = if idx + 1 < n_samples { data[idx + 1] } else { s0 };
        out.push([
            s0[0] + (s1[0] - s0[0]) * frac,
            s0[1] + (s1[1] - s0[1]) * frac,
        ]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};

    #[test]
    fn test_loads_mono_16bit_as_stereo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for s in [0i16, 16384, -16384, 32767] {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        let data = load_audio(&path, 8000).unwrap();
        assert_eq!(data.len(), 4);
        assert_eq!(data[1], [0.5, 0.5]);
        assert_eq!(data[2], [-0.5, -0.5]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(matches!(
            load_audio("does/not/exist.wav", 48000),
            Err(AudioError::Decode(_))
        ));
    }

    #[test]
    fn test_bundled_cue_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/sounds/crackers.wav");
        let data = load_audio(path, 48000).unwrap();
        assert!(data.len() > 48000);
        assert!(data.iter().any(|s| s[0] != 0.0 && s[0] == s[1]));
    }

    #[test]
    fn test_resample_doubles_length() {
        let data = vec![[0.0, 0.0], [1.0, -1.0]];
        let out = resample_linear(&data, 1, 2);
        assert_eq!(out.len(), 4);
        assert_eq!(out[0], [0.0, 0.0]);
        assert_eq!(out[3], [1.0, -1.0]);
    }
}
