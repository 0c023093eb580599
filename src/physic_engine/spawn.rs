use rand::Rng;

use crate::physic_engine::{
    config::PhysicConfig,
    random::random_between,
    types::{Vec2, Viewport},
};

/// Politique de lancement aléatoire des fusées.
///
/// Les fusées partent du bas de l'écran, près du centre horizontal, et visent
/// la moitié haute de l'écran sur presque toute sa largeur.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchPolicy {
    pub probability: f64,
    pub spread: f32,
    pub target_x: (f32, f32),
    pub target_y: (f32, f32),
}

impl From<&PhysicConfig> for LaunchPolicy {
    fn from(cfg: &PhysicConfig) -> Self {
        Self {
            probability: cfg.auto_launch_probability,
            spread: cfg.launch_spread,
            target_x: (cfg.target_min_x, cfg.target_max_x),
            target_y: (cfg.target_min_y, cfg.target_max_y),
        }
    }
}

impl Default for LaunchPolicy {
    fn default() -> Self {
        Self::from(&PhysicConfig::default())
    }
}

impl LaunchPolicy {
    /// Tirage de Bernoulli : faut-il lancer une fusée cette frame ?
    pub fn should_auto_launch<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.random_bool(self.probability.clamp(0.0, 1.0))
    }

    /// Tire un couple (origine, cible) pour le viewport donné.
    pub fn pick<R: Rng + ?Sized>(&self, viewport: Viewport, rng: &mut R) -> (Vec2, Vec2) {
        let origin = Vec2::new(
            viewport.center_x() + random_between(rng, -self.spread, self.spread),
            viewport.height,
        );
        let target = Vec2::new(
            random_between(
                rng,
                viewport.width * self.target_x.0,
                viewport.width * self.target_x.1,
            ),
            random_between(
                rng,
                viewport.height * self.target_y.0,
                viewport.height * self.target_y.1,
            ),
        );
        (origin, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_picks_inside_launch_and_target_regions() {
        let policy = LaunchPolicy::default();
        let viewport = Viewport::new(1280.0, 720.0);
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);

        for _ in 0..1000 {
            let (origin, target) = policy.pick(viewport, &mut rng);
            assert!((340.0..=940.0).contains(&origin.x));
            assert_eq!(origin.y, 720.0);
            assert!((128.0..=1152.0).contains(&target.x));
            assert!((72.0..=360.0).contains(&target.y));
        }
    }

    #[test]
    fn test_empty_viewport_does_not_panic() {
        let policy = LaunchPolicy::default();
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        let (_, target) = policy.pick(Viewport::default(), &mut rng);
        assert_eq!(target, Vec2::ZERO);
    }

    #[test]
    fn test_zero_probability_never_launches() {
        let policy = LaunchPolicy {
            probability: 0.0,
            ..LaunchPolicy::default()
        };
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        assert!((0..1000).all(|_| !policy.should_auto_launch(&mut rng)));
    }
}
