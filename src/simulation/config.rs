// src/simulation/config.rs

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::model::CostRates;

/// Parameters recognized by the optimizer.
///
/// Unknown keys in a parameter document are ignored; missing keys take the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerParams {
    /// Currency per unit held per day.
    pub holding_cost: f64,
    /// Currency per unit of unmet demand.
    pub stockout_cost: f64,
    /// Planning horizon in days. Negative values in a document read as 0.
    #[serde(deserialize_with = "non_negative_count")]
    pub horizon: u32,
    /// Search budget; the engine always runs exactly this many iterations.
    /// Negative values in a document read as 0.
    #[serde(deserialize_with = "non_negative_count")]
    pub iterations: u32,
    /// Seed for the search's random source. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Upper bound on the explanatory-text call made after the search.
    pub interpretation_timeout_ms: u64,
}

/// Reads any JSON integer, saturating it into `0..=u32::MAX`.
fn non_negative_count<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(0, i64::from(u32::MAX)) as u32)
}

impl Default for OptimizerParams {
    fn default() -> Self {
        Self {
            holding_cost: 5.0,
            stockout_cost: 50.0,
            horizon: 30,
            iterations: 2000,
            seed: None,
            interpretation_timeout_ms: 5000,
        }
    }
}

impl OptimizerParams {
    /// Reads a JSON parameter document such as `{"holding_cost": 2, "horizon": 14}`.
    pub fn from_json(raw: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(raw)?;
        params.validate()?;
        Ok(params)
    }

    /// Cost rates must be finite and non-negative. Nothing else is checked.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("holding_cost", self.holding_cost),
            ("stockout_cost", self.stockout_cost),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid_parameter(
                    name,
                    format!("must be a finite number >= 0, got {value}"),
                ));
            }
        }
        Ok(())
    }

    pub fn cost_rates(&self) -> CostRates {
        CostRates::new(self.holding_cost, self.stockout_cost)
    }

    pub fn interpretation_timeout(&self) -> Duration {
        Duration::from_millis(self.interpretation_timeout_ms)
    }

    /// The random source for one optimization call.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
