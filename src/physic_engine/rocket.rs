#[cfg(debug_assertions)]
use log::debug;

use crate::physic_engine::{
    config::PhysicConfig,
    trail::RocketTrail,
    types::{RocketStatus, Vec2},
};

/// Représentation d’une fusée : elle vole en ligne droite de `origin` vers
/// `target`, en accélérant, puis explose à son arrivée.
#[derive(Debug, Clone)]
pub struct Rocket {
    /// ID attribué par le registre à l'insertion (0 avant)
    id: u64,

    pos: Vec2,
    origin: Vec2,
    target: Vec2,

    total_distance: f32,
    traveled_distance: f32,

    trail: RocketTrail,

    /// Angle origin → target (radians), fixé à la création
    heading: f32,
    speed: f32,
    acceleration: f32,
}

impl Rocket {
    pub fn new(origin: Vec2, target: Vec2, config: &PhysicConfig) -> Self {
        let delta = target - origin;
        Self {
            id: 0,
            pos: origin,
            origin,
            target,
            total_distance: delta.length(),
            traveled_distance: 0.0,
            trail: RocketTrail::new(origin),
            heading: delta.y.atan2(delta.x),
            speed: config.rocket_speed,
            acceleration: config.rocket_acceleration,
        }
    }

    /// Avance la fusée d'un tick.
    ///
    /// La distance parcourue est mesurée *avant* le déplacement : le tick où
    /// elle atteint la distance totale, la fusée ne bouge plus et renvoie
    /// [`RocketStatus::Arrived`].
    pub fn advance(&mut self) -> RocketStatus {
        self.trail.push(self.pos);

        self.speed *= self.acceleration;
        let vel = Vec2::from_angle(self.heading) * self.speed;

        self.traveled_distance = self.pos.distance(self.origin);

        if self.traveled_distance >= self.total_distance {
            #[cfg(debug_assertions)]
            debug!(
                "💥 Rocket {} arrived at ({:.0}, {:.0})",
                self.id, self.target.x, self.target.y
            );
            return RocketStatus::Arrived;
        }

        self.pos += vel;
        RocketStatus::Flying
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub(super) fn assign_id(&mut self, id: u64) {
        self.id = id;
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn total_distance(&self) -> f32 {
        self.total_distance
    }

    pub fn traveled_distance(&self) -> f32 {
        self.traveled_distance
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn trail(&self) -> &RocketTrail {
        &self.trail
    }
}
