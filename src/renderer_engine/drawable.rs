use rand::Rng;

use crate::physic_engine::{random_between, Color, Particle, Rocket};
use crate::renderer_engine::config::RendererConfig;
use crate::renderer_engine::r#trait::DrawingSurface;
use crate::renderer_engine::types::Rgba;

/// Objet de la simulation capable de se dessiner sur une surface.
pub trait Drawable {
    fn render<S, R>(&self, surface: &mut S, style: &RendererConfig, rng: &mut R)
    where
        S: DrawingSurface + ?Sized,
        R: Rng + ?Sized;
}

impl Drawable for Rocket {
    /// Traînée de la plus ancienne position vers la position courante, teinte
    /// tirée à chaque frame, puis tête blanche.
    fn render<S, R>(&self, surface: &mut S, style: &RendererConfig, rng: &mut R)
    where
        S: DrawingSurface + ?Sized,
        R: Rng + ?Sized,
    {
        let hue = random_between(rng, 0.0, 360.0);
        let tail = Color::from_hsl(hue, style.rocket_saturation, style.rocket_lightness);
        surface.stroke_line(
            self.trail().oldest(),
            self.pos(),
            tail.into(),
            style.rocket_line_width,
        );
        surface.fill_circle(self.pos(), style.rocket_head_radius, Rgba::WHITE);
    }
}

impl Drawable for Particle {
    /// Traînée dans la couleur de la particule, à son opacité courante.
    fn render<S, R>(&self, surface: &mut S, style: &RendererConfig, _rng: &mut R)
    where
        S: DrawingSurface + ?Sized,
        R: Rng + ?Sized,
    {
        surface.set_global_alpha(self.alpha());
        surface.stroke_line(
            self.trail().oldest(),
            self.pos(),
            self.color().into(),
            style.particle_line_width,
        );
        surface.set_global_alpha(1.0);
    }
}
