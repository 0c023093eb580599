use rand::Rng;

use crate::physic_engine::{config::PhysicConfig, particle::Particle, rocket::Rocket, types::Vec2};

/// Collections des effets actifs (fusées et particules).
///
/// Les deux `Vec` sont ordonnés et adressables par index ; les retraits
/// préservent l'ordre. Pendant une passe de simulation on itère par index
/// décroissant, ce qui garde valides les index restant à visiter même quand
/// plusieurs objets sont retirés dans la même frame.
///
/// Chaque registre numérote ses propres fusées à partir de 0.
#[derive(Debug, Default)]
pub struct EffectRegistry {
    rockets: Vec<Rocket>,
    particles: Vec<Particle>,
    next_rocket_id: u64,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute la fusée et renvoie l'ID qui lui a été attribué.
    pub fn push_rocket(&mut self, mut rocket: Rocket) -> u64 {
        let id = self.next_rocket_id;
        self.next_rocket_id += 1;
        rocket.assign_id(id);
        self.rockets.push(rocket);
        id
    }

    pub fn push_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Crée une gerbe de `count` particules centrées sur `center`.
    pub fn spawn_burst<R: Rng + ?Sized>(
        &mut self,
        center: Vec2,
        count: usize,
        config: &PhysicConfig,
        rng: &mut R,
    ) {
        self.particles.reserve(count);
        self.particles
            .extend((0..count).map(|_| Particle::new(center, config, &mut *rng)));
    }

    pub fn remove_rocket(&mut self, index: usize) -> Rocket {
        self.rockets.remove(index)
    }

    pub fn remove_particle(&mut self, index: usize) -> Particle {
        self.particles.remove(index)
    }

    pub fn rockets(&self) -> &[Rocket] {
        &self.rockets
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn rocket_mut(&mut self, index: usize) -> Option<&mut Rocket> {
        self.rockets.get_mut(index)
    }

    pub fn particle_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.particles.get_mut(index)
    }

    pub fn rocket_count(&self) -> usize {
        self.rockets.len()
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rockets.is_empty() && self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.rockets.clear();
        self.particles.clear();
    }
}
