use crate::scorer::{round_tenth, ScoredInstance};
use fastrand::Rng;

/// Multiplies every score by an independent factor drawn uniformly from
/// `[1 - amplitude, 1 + amplitude)`.
///
/// Draws happen in slice order, so a fixed seed and input order give the
/// same jitter every time.
pub fn jitter_scores(scored: &mut [ScoredInstance], rng: &mut Rng, amplitude: f64) {
    if amplitude <= 0.0 {
        return;
    }
    for s in scored.iter_mut() {
        let factor = 1.0 - amplitude + rng.f64() * 2.0 * amplitude;
        s.score = round_tenth(s.score * factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::instance;

    fn pool() -> Vec<ScoredInstance> {
        (0..20)
            .map(|i| {
                ScoredInstance::new(
                    instance(&format!("i{}", i), "e", "d1", "19:15", "20:30", "X", "Music"),
                    50.0 + i as f64,
                )
            })
            .collect()
    }

    #[test]
    fn same_seed_same_jitter() {
        let mut a = pool();
        let mut b = pool();
        jitter_scores(&mut a, &mut Rng::with_seed(7), 0.1);
        jitter_scores(&mut b, &mut Rng::with_seed(7), 0.1);
        assert_eq!(a, b);
    }

    #[test]
    fn jitter_stays_in_band() {
        let base = pool();
        let mut j = pool();
        jitter_scores(&mut j, &mut Rng::with_seed(99), 0.1);
        for (orig, new) in base.iter().zip(&j) {
            assert!(new.score >= (orig.score * 0.9 - 0.05));
            assert!(new.score <= (orig.score * 1.1 + 0.05));
        }
        assert_ne!(base, j);
    }

    #[test]
    fn zero_amplitude_is_identity() {
        let base = pool();
        let mut j = pool();
        jitter_scores(&mut j, &mut Rng::with_seed(1), 0.0);
        assert_eq!(base, j);
    }
}
