use glam::Vec2;

use crate::renderer_engine::types::{CompositeOperation, Rgba};

/// Surface de dessin 2D consommée par le moteur (contrat calqué sur un
/// contexte canvas 2D).
///
/// L'état (`composite_operation`, `global_alpha`) persiste entre les appels
/// jusqu'à ce qu'il soit modifié, comme sur un contexte canvas.
pub trait DrawingSurface {
    /// Taille courante en pixels `(largeur, hauteur)`.
    fn size(&self) -> (u32, u32);

    /// Redimensionne la surface ; le contenu est perdu.
    fn resize(&mut self, width: u32, height: u32);

    /// Remet la zone à transparent, quel que soit l'état de composition.
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    fn set_composite_operation(&mut self, op: CompositeOperation);
    fn composite_operation(&self) -> CompositeOperation;

    fn set_global_alpha(&mut self, alpha: f32);
    fn global_alpha(&self) -> f32;

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, style: Rgba);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, style: Rgba, width: f32);

    fn fill_circle(&mut self, center: Vec2, radius: f32, style: Rgba);

    /// Efface toute la surface.
    fn clear(&mut self) {
        let (w, h) = self.size();
        self.clear_rect(0.0, 0.0, w as f32, h as f32);
    }
}
