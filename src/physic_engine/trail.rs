use glam::Vec2;

/// Historique de positions de taille fixe, de la plus récente à la plus ancienne.
///
/// Sert uniquement au rendu de la traînée : on trace un segment entre
/// [`Trail::oldest`] et la position courante de l'objet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trail<const N: usize> {
    points: [Vec2; N],
}

pub type RocketTrail = Trail<4>;
pub type ParticleTrail = Trail<6>;

impl<const N: usize> Trail<N> {
    /// Initialise l'historique avec `N` copies de `origin`.
    pub fn new(origin: Vec2) -> Self {
        Self { points: [origin; N] }
    }

    /// Insère `point` en tête et oublie la plus ancienne position.
    #[inline]
    pub fn push(&mut self, point: Vec2) {
        self.points.rotate_right(1);
        self.points[0] = point;
    }

    pub fn newest(&self) -> Vec2 {
        self.points[0]
    }

    pub fn oldest(&self) -> Vec2 {
        self.points[N - 1]
    }

    pub fn points(&self) -> &[Vec2; N] {
        &self.points
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_newest_first() {
        let mut trail = Trail::<4>::new(Vec2::ZERO);
        for i in 1..=6 {
            trail.push(Vec2::splat(i as f32));
        }
        assert_eq!(trail.len(), 4);
        assert_eq!(
            trail.points(),
            &[
                Vec2::splat(6.0),
                Vec2::splat(5.0),
                Vec2::splat(4.0),
                Vec2::splat(3.0)
            ]
        );
        assert_eq!(trail.newest(), Vec2::splat(6.0));
        assert_eq!(trail.oldest(), Vec2::splat(3.0));
    }

    #[test]
    fn test_seeded_with_origin() {
        let trail = ParticleTrail::new(Vec2::new(1.0, 2.0));
        assert!(trail.points().iter().all(|&p| p == Vec2::new(1.0, 2.0)));
    }
}
