use anyhow::{anyhow, Context};
use crossbeam_channel::{unbounded, Receiver, Sender};
use hound::{WavSpec, WavWriter};
use log::{info, warn};
use std::{fs::File, io::BufWriter, path::Path, thread};

/// Bloc audio identifié
#[derive(Debug)]
pub struct AudioBlock {
    pub index: u64,
    pub frames: Vec<[f32; 2]>,
}

/// Export WAV (stéréo, 16 bits) de la bande son mixée, écrit depuis un thread dédié.
pub struct SafeWavWriter {
    tx: Option<Sender<AudioBlock>>,
    handle: Option<thread::JoinHandle<anyhow::Result<u64>>>,
    next_index: u64,
}

impl SafeWavWriter {
    /// Crée le fichier immédiatement, pour signaler un chemin invalide au plus tôt.
    pub fn new(path: impl AsRef<Path>, sample_rate: u32) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let spec = WavSpec {
            channels: 2,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let file = File::create(path)
            .with_context(|| format!("Failed to open WAV file at '{}'", path.display()))?;
        let mut writer = WavWriter::new(BufWriter::new(file), spec)?;

        let (tx, rx): (Sender<AudioBlock>, Receiver<AudioBlock>) = unbounded();

        info!("Exporting soundtrack to WAV file at path: {}", path.display());
        let handle = thread::spawn(move || -> anyhow::Result<u64> {
            let mut total_frames: u64 = 0;
            let mut expected_index = 0;
            for block in rx {
                if block.index != expected_index {
                    warn!(
                        "Audio block out of order: expected {}, got {}",
                        expected_index, block.index
                    );
                }
                expected_index = block.index + 1;

                for frame in &block.frames {
                    for s in frame {
                        let v = (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
                        writer.write_sample(v)?;
                    }
                }
                total_frames += block.frames.len() as u64;
            }
            writer.finalize()?;
            Ok(total_frames)
        });

        Ok(Self {
            tx: Some(tx),
            handle: Some(handle),
            next_index: 0,
        })
    }

    pub fn push_block(&mut self, frames: Vec<[f32; 2]>) -> anyhow::Result<()> {
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| anyhow!("WAV writer already finished"))?;
        tx.send(AudioBlock {
            index: self.next_index,
            frames,
        })
        .map_err(|_| anyhow!("WAV writer thread stopped"))?;
        self.next_index += 1;
        Ok(())
    }

    /// Termine l'écriture et renvoie le nombre de frames écrites.
    pub fn finish(mut self) -> anyhow::Result<u64> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> anyhow::Result<u64> {
        self.tx.take();
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| anyhow!("WAV writer thread panicked"))?,
            None => Ok(0),
        }
    }
}

impl Drop for SafeWavWriter {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!("{}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_all_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("show.wav");

        let mut writer = SafeWavWriter::new(&path, 48000).unwrap();
        writer.push_block(vec![[0.5, -0.5]; 480]).unwrap();
        writer.push_block(vec![[0.0, 0.0]; 20]).unwrap();
        assert_eq!(writer.finish().unwrap(), 500);

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().channels, 2);
        assert_eq!(reader.spec().sample_rate, 48000);
        assert_eq!(reader.duration(), 500);
    }

    #[test]
    fn test_invalid_path_fails_early() {
        assert!(SafeWavWriter::new("/nonexistent-dir/x/show.wav", 48000).is_err());
    }
}
