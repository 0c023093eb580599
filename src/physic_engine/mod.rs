pub mod types;
pub use self::types::{Color, ParticleStatus, RocketStatus, Vec2, Viewport};

pub mod config;
pub use self::config::{PhysicConfig, DEFAULT_PALETTE};

pub mod random;
pub use self::random::random_between;

pub mod trail;
pub use self::trail::{ParticleTrail, RocketTrail, Trail};

pub mod rocket;
pub use self::rocket::Rocket;

pub mod particle;
pub use self::particle::Particle;

pub mod registry;
pub use self::registry::EffectRegistry;

pub mod spawn;
pub use self::spawn::LaunchPolicy;
