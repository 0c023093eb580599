use anyhow::{anyhow, Context};
use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::thread;

use crate::physic_engine::Color;
use crate::renderer_engine::canvas::SoftwareCanvas;

/// Frame identifiée, prête à être encodée
#[derive(Debug)]
pub struct ExportedFrame {
    pub index: u64,
    pub image: image::RgbImage,
}

/// Export asynchrone de frames en PNG numérotés (`frame_000042.png`).
///
/// L'encodage se fait dans un thread dédié, alimenté par un canal : la boucle
/// d'animation ne fait que copier le tampon de la surface.
pub struct FrameExporter {
    tx: Option<Sender<ExportedFrame>>,
    handle: Option<thread::JoinHandle<usize>>,
    dir: PathBuf,
    background: Color,
}

impl FrameExporter {
    pub fn new(dir: impl AsRef<Path>, background: Color) -> anyhow::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

        let (tx, rx): (Sender<ExportedFrame>, Receiver<ExportedFrame>) = unbounded();

        info!("🖼️ Exporting frames to {}", dir.display());
        let out_dir = dir.clone();
        let handle = thread::spawn(move || {
            let mut written = 0;
            for frame in rx {
                let path = out_dir.join(format!("frame_{:06}.png", frame.index));
                match frame.image.save(&path) {
                    Ok(()) => written += 1,
                    Err(e) => warn!("Failed to write {}: {}", path.display(), e),
                }
            }
            written
        });

        Ok(Self {
            tx: Some(tx),
            handle: Some(handle),
            dir,
            background,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copie la surface et l'envoie au thread d'encodage.
    pub fn submit(&self, index: u64, canvas: &SoftwareCanvas) -> anyhow::Result<()> {
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| anyhow!("frame exporter already finished"))?;
        tx.send(ExportedFrame {
            index,
            image: canvas.to_image_over(self.background),
        })
        .map_err(|_| anyhow!("frame exporter thread stopped"))
    }

    /// Ferme le canal, attend la fin des écritures et renvoie le nombre de fichiers écrits.
    pub fn finish(mut self) -> anyhow::Result<usize> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> anyhow::Result<usize> {
        self.tx.take();
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| anyhow!("frame exporter thread panicked")),
            None => Ok(0),
        }
    }
}

impl Drop for FrameExporter {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!("{}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer_engine::DrawingSurface;

    #[test]
    fn test_writes_numbered_png_files() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = FrameExporter::new(dir.path().join("frames"), Color::BLACK).unwrap();

        let mut canvas = SoftwareCanvas::new(16, 8);
        canvas.fill_rect(0.0, 0.0, 4.0, 4.0, Color::WHITE.into());
        exporter.submit(3, &canvas).unwrap();
        exporter.submit(7, &canvas).unwrap();

        let out = exporter.dir().to_path_buf();
        assert_eq!(exporter.finish().unwrap(), 2);

        let img = image::open(out.join("frame_000003.png")).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (16, 8));
        assert_eq!(img.get_pixel(1, 1).0, [255, 255, 255]);
        assert_eq!(img.get_pixel(10, 6).0, [0, 0, 0]);
        assert!(out.join("frame_000007.png").exists());
    }
}
