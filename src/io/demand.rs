// src/io/demand.rs

use rand::Rng;
use rand_distr::{Distribution, Normal, Poisson};

use crate::error::{Error, Result};

/// Generates a demand history where every day has the exact same value.
/// Useful for convergence checks: the best order should track `value`.
pub fn generate_constant_demand(days: usize, value: f64) -> Vec<f64> {
    vec![value; days]
}

/// Generates a demand history based on a Normal (Bell Curve) distribution.
///
/// Negative draws are clamped to 0 (demand cannot be negative) and values
/// are rounded to whole units.
///
/// # Arguments
/// * `days` - Length of the history.
/// * `mean` - The average daily demand (e.g., 10.0).
/// * `std_dev` - The standard deviation (volatility) (e.g., 2.0).
pub fn generate_normal_demand<R: Rng + ?Sized>(
    days: usize,
    mean: f64,
    std_dev: f64,
    rng: &mut R,
) -> Result<Vec<f64>> {
    let normal = Normal::new(mean, std_dev)
        .map_err(|e| Error::invalid_parameter("std_dev", e.to_string()))?;

    Ok((0..days)
        .map(|_| normal.sample(rng).round().max(0.0))
        .collect())
}

/// Generates a Poisson-distributed daily demand history, the usual model for
/// unit sales of a single SKU.
pub fn generate_poisson_demand<R: Rng + ?Sized>(
    days: usize,
    mean: f64,
    rng: &mut R,
) -> Result<Vec<f64>> {
    let poisson =
        Poisson::new(mean).map_err(|e| Error::invalid_parameter("mean", e.to_string()))?;

    Ok((0..days).map(|_| poisson.sample(rng)).collect())
}

/// Generates a "Step" pattern: `low` for the first `switch_day` days, then `high`.
/// Sudden level shifts are what classically trigger the Bullwhip effect.
pub fn generate_step_demand(days: usize, switch_day: usize, low: f64, high: f64) -> Vec<f64> {
    (0..days)
        .map(|d| if d < switch_day { low } else { high })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn normal_demand_is_non_negative_whole_units() {
        let mut rng = StdRng::seed_from_u64(3);
        let demand = generate_normal_demand(200, 2.0, 5.0, &mut rng).unwrap();
        assert_eq!(demand.len(), 200);
        assert!(demand.iter().all(|d| *d >= 0.0 && d.fract() == 0.0));
    }

    #[test]
    fn poisson_rejects_non_positive_mean() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(generate_poisson_demand(10, 0.0, &mut rng).is_err());
    }

    #[test]
    fn step_pattern_switches_once() {
        let demand = generate_step_demand(6, 4, 4.0, 8.0);
        assert_eq!(demand, vec![4.0, 4.0, 4.0, 4.0, 8.0, 8.0]);
    }
}
