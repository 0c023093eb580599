use rand::Rng;

use crate::physic_engine::{
    config::PhysicConfig,
    random::random_between,
    trail::ParticleTrail,
    types::{Color, ParticleStatus, Vec2},
};

/// Fragment d'explosion : direction fixe, vitesse freinée par la friction,
/// gravité constante et opacité décroissante.
#[derive(Debug, Clone)]
pub struct Particle {
    pos: Vec2,
    trail: ParticleTrail,

    heading: f32,
    speed: f32,
    friction: f32,
    gravity: f32,

    /// Teinte tirée au hasard (informative, le tracé utilise `color`)
    hue: f32,
    color: Color,

    alpha: f32,
    decay: f32,
}

impl Particle {
    pub fn new<R: Rng + ?Sized>(origin: Vec2, config: &PhysicConfig, rng: &mut R) -> Self {
        let color = match config.palette.len() {
            0 => Color::WHITE,
            n => config.palette[rng.random_range(0..n)],
        };
        Self {
            pos: origin,
            trail: ParticleTrail::new(origin),
            heading: random_between(rng, 0.0, std::f32::consts::TAU),
            speed: random_between(rng, config.particle_min_speed, config.particle_max_speed),
            friction: config.particle_friction,
            gravity: config.particle_gravity,
            hue: random_between(rng, 0.0, 360.0),
            color,
            alpha: 1.0,
            decay: random_between(rng, config.particle_min_decay, config.particle_max_decay),
        }
    }

    /// Avance la particule d'un tick.
    ///
    /// Renvoie [`ParticleStatus::Expired`] dès que `alpha <= decay` : le tick
    /// suivant la ferait passer sous zéro, elle ne doit donc plus être dessinée.
    pub fn advance(&mut self) -> ParticleStatus {
        self.trail.push(self.pos);

        self.speed *= self.friction;
        self.pos += Vec2::from_angle(self.heading) * self.speed;
        self.pos.y += self.gravity;

        self.alpha -= self.decay;

        if self.alpha <= self.decay {
            ParticleStatus::Expired
        } else {
            ParticleStatus::Alive
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn trail(&self) -> &ParticleTrail {
        &self.trail
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn decay(&self) -> f32 {
        self.decay
    }
}
