use rand::Rng;

use crate::physic_engine::Color;
use crate::renderer_engine::config::RendererConfig;
use crate::renderer_engine::drawable::Drawable;
use crate::renderer_engine::r#trait::DrawingSurface;
use crate::renderer_engine::types::{CompositeOperation, Rgba};

/// Dessine les objets actifs et applique le voile d'effacement des traînées.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: RendererConfig) {
        self.config = config;
    }

    /// Voile semi-transparent en `destination-out` sur toute la surface :
    /// les anciennes traînées s'estompent sans être effacées d'un coup.
    /// La composition normale est rétablie pour les dessins suivants.
    pub fn fade_pass<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        let (w, h) = surface.size();
        surface.set_composite_operation(CompositeOperation::DestinationOut);
        surface.fill_rect(
            0.0,
            0.0,
            w as f32,
            h as f32,
            Rgba::new(Color::BLACK, self.config.fade_alpha),
        );
        surface.set_composite_operation(CompositeOperation::SourceOver);
    }

    pub fn draw<D, S, R>(&self, item: &D, surface: &mut S, rng: &mut R)
    where
        D: Drawable,
        S: DrawingSurface + ?Sized,
        R: Rng + ?Sized,
    {
        item.render(surface, &self.config, rng);
    }

    pub fn clear<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
    }
}
