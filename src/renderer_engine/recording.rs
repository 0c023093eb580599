//! Surface factice qui journalise les appels de dessin (tests, outils).

use glam::Vec2;

use crate::renderer_engine::r#trait::DrawingSurface;
use crate::renderer_engine::types::{CompositeOperation, Rgba};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Resize(u32, u32),
    ClearRect { x: f32, y: f32, w: f32, h: f32 },
    SetComposite(CompositeOperation),
    SetGlobalAlpha(f32),
    FillRect { x: f32, y: f32, w: f32, h: f32, style: Rgba },
    StrokeLine { from: Vec2, to: Vec2, style: Rgba, width: f32 },
    FillCircle { center: Vec2, radius: f32, style: Rgba },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    composite: CompositeOperation,
    global_alpha: f32,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            composite: CompositeOperation::SourceOver,
            global_alpha: 1.0,
            commands: Vec::new(),
        }
    }

    /// Vide le journal et le renvoie.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Opacité globale en vigueur au moment de chaque tracé de segment.
    pub fn stroke_alphas(&self) -> Vec<f32> {
        let mut alpha = 1.0;
        let mut out = Vec::new();
        for cmd in &self.commands {
            match cmd {
                DrawCommand::SetGlobalAlpha(a) => alpha = *a,
                DrawCommand::StrokeLine { .. } => out.push(alpha),
                _ => {}
            }
        }
        out
    }
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.push(DrawCommand::Resize(width, height));
    }

    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.commands.push(DrawCommand::ClearRect { x, y, w, h });
    }

    fn set_composite_operation(&mut self, op: CompositeOperation) {
        self.composite = op;
        self.commands.push(DrawCommand::SetComposite(op));
    }

    fn composite_operation(&self) -> CompositeOperation {
        self.composite
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha;
        self.commands.push(DrawCommand::SetGlobalAlpha(alpha));
    }

    fn global_alpha(&self) -> f32 {
        self.global_alpha
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, style: Rgba) {
        self.commands
            .push(DrawCommand::FillRect { x, y, w, h, style });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, style: Rgba, width: f32) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            style,
            width,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, style: Rgba) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            style,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physic_engine::{Color, Particle, PhysicConfig, Rocket};
    use crate::renderer_engine::{Renderer, RendererConfig};
    use rand::SeedableRng;

    #[test]
    fn test_fade_pass_erases_then_restores_source_over() {
        let mut surface = RecordingSurface::new(640, 480);
        Renderer::default().fade_pass(&mut surface);

        assert_eq!(
            surface.commands,
            vec![
                DrawCommand::SetComposite(CompositeOperation::DestinationOut),
                DrawCommand::FillRect {
                    x: 0.0,
                    y: 0.0,
                    w: 640.0,
                    h: 480.0,
                    style: Rgba::new(Color::BLACK, 0.15),
                },
                DrawCommand::SetComposite(CompositeOperation::SourceOver),
            ]
        );
    }

    #[test]
    fn test_rocket_draws_tail_then_white_head() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        let mut rocket = Rocket::new(
            Vec2::new(100.0, 400.0),
            Vec2::new(100.0, 0.0),
            &PhysicConfig::default(),
        );
        for _ in 0..5 {
            rocket.advance();
        }

        let mut surface = RecordingSurface::new(200, 400);
        Renderer::new(RendererConfig::default()).draw(&rocket, &mut surface, &mut rng);

        match surface.commands.as_slice() {
            [DrawCommand::StrokeLine {
                from, to, width, ..
            }, DrawCommand::FillCircle {
                center,
                radius,
                style,
            }] => {
                assert_eq!(*from, rocket.trail().oldest());
                assert_eq!(*to, rocket.pos());
                assert_eq!(*width, 4.0);
                assert_eq!(*center, rocket.pos());
                assert_eq!(*radius, 4.0);
                assert_eq!(*style, Rgba::WHITE);
            }
            other => panic!("unexpected commands: {other:?}"),
        }
    }

    #[test]
    fn test_particle_stroke_uses_its_alpha_and_restores_opacity() {
        let cfg = PhysicConfig::default();
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        let mut particle = Particle::new(Vec2::new(50.0, 50.0), &cfg, &mut rng);
        particle.advance();
        particle.advance();

        let mut surface = RecordingSurface::new(100, 100);
        Renderer::default().draw(&particle, &mut surface, &mut rng);

        assert_eq!(surface.stroke_alphas(), vec![particle.alpha()]);
        assert_eq!(
            surface.commands.last(),
            Some(&DrawCommand::SetGlobalAlpha(1.0))
        );
        assert!(matches!(
            surface.commands[1],
            DrawCommand::StrokeLine { width, style, .. }
                if width == 3.0 && style.color == particle.color()
        ));
    }
}
