use rand::Rng;

/// Valeur uniforme dans `[min, max]`.
///
/// La borne haute est atteignable : en `f32`, `min + r * (max - min)` peut
/// arrondir à `max` même si `r < 1`.
///
/// Contrairement à `Rng::random_range`, un intervalle vide ou inversé ne panique
/// pas : on obtient `min` (ou une valeur entre `max` et `min`). Utile quand les
/// bornes dépendent de la taille du viewport, qui peut être nulle.
#[inline]
pub fn random_between<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_stays_in_range() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = random_between(&mut rng, -300.0, 300.0);
            assert!((-300.0..=300.0).contains(&v), "out of range: {v}");
        }
    }

    /// Générateur qui renvoie toujours le tirage maximal.
    struct MaxRng;

    impl rand::RngCore for MaxRng {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }

        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0xff);
        }
    }

    #[test]
    fn test_upper_bound_is_inclusive() {
        for (min, max) in [(0.01, 0.02), (2.0, 12.0), (0.0, 360.0), (-300.0, 300.0)] {
            let v = random_between(&mut MaxRng, min, max);
            assert!((min..=max).contains(&v), "{v} outside [{min}, {max}]");
            assert!(v > min);
        }
    }

    #[test]
    fn test_degenerate_range_does_not_panic() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        assert_eq!(random_between(&mut rng, 5.0, 5.0), 5.0);
        let v = random_between(&mut rng, 0.0, -1.0);
        assert!((-1.0..=0.0).contains(&v));
    }
}
