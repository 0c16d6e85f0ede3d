// src/simulation/sampler.rs

use rand::seq::SliceRandom;
use rand::Rng;

/// Nonparametric bootstrap over the historical demand observations.
///
/// Each draw picks one observation uniformly, with replacement, so skew and
/// zero-inflation in the history carry over to the simulated futures.
#[derive(Debug, Clone, Copy)]
pub struct DemandSampler<'a> {
    observations: &'a [f64],
}

impl<'a> DemandSampler<'a> {
    pub fn new(observations: &'a [f64]) -> Self {
        Self { observations }
    }

    /// One demand draw. An empty history yields zero demand.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.observations.choose(rng).copied().unwrap_or(0.0)
    }

    /// A demand path of `len` independent draws.
    pub fn sample_path<R: Rng + ?Sized>(&self, len: usize, rng: &mut R) -> Vec<f64> {
        (0..len).map(|_| self.sample(rng)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn draws_only_observed_values() {
        let history = [0.0, 3.0, 11.0];
        let sampler = DemandSampler::new(&history);
        let mut rng = StdRng::seed_from_u64(9);

        for draw in sampler.sample_path(500, &mut rng) {
            assert!(history.contains(&draw));
        }
    }

    #[test]
    fn every_observation_is_reachable() {
        let history = [1.0, 2.0, 3.0, 4.0];
        let sampler = DemandSampler::new(&history);
        let mut rng = StdRng::seed_from_u64(1);

        let path = sampler.sample_path(1000, &mut rng);
        for value in history {
            assert!(path.contains(&value));
        }
    }

    #[test]
    fn empty_history_samples_zero() {
        let sampler = DemandSampler::new(&[]);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(sampler.sample(&mut rng), 0.0);
    }
}
