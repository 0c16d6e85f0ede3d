// src/model/demand.rs

use serde::Serialize;

use crate::error::{Error, Result};

/// Historical demand observations plus the stock on hand today.
///
/// This is the output of dataset preparation and the sole input the search
/// needs besides its parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandProfile {
    observations: Vec<f64>,
    current_stock: f64,
    mean: f64,
    std_dev: f64,
}

impl DemandProfile {
    /// Fails with [`Error::EmptyDemandSeries`] when there is nothing to resample.
    ///
    /// Non-finite observations are dropped, negatives clamped to zero.
    pub fn new(observations: Vec<f64>, current_stock: f64) -> Result<Self> {
        let mut clamped = 0usize;
        let observations: Vec<f64> = observations
            .into_iter()
            .filter(|v| v.is_finite())
            .map(|v| {
                if v < 0.0 {
                    clamped += 1;
                    0.0
                } else {
                    v
                }
            })
            .collect();

        if clamped > 0 {
            tracing::warn!(clamped, "negative demand observations clamped to zero");
        }

        if observations.is_empty() {
            return Err(Error::EmptyDemandSeries {
                column: "demand".to_string(),
            });
        }

        let mean = mean(&observations);
        let std_dev = variance(&observations, mean).sqrt();

        Ok(Self {
            observations,
            current_stock: if current_stock.is_finite() {
                current_stock.max(0.0)
            } else {
                0.0
            },
            mean,
            std_dev,
        })
    }

    /// Same as [`DemandProfile::new`] with the stock defaulted to 2 × mean demand.
    pub fn with_default_stock(observations: Vec<f64>) -> Result<Self> {
        let mut profile = Self::new(observations, 0.0)?;
        profile.current_stock = profile.mean * 2.0;
        Ok(profile)
    }

    pub fn observations(&self) -> &[f64] {
        &self.observations
    }

    pub fn current_stock(&self) -> f64 {
        self.current_stock
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Population variance.
    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }
}

pub(crate) fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Population variance (divides by n).
pub(crate) fn variance(xs: &[f64], mean: f64) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / xs.len() as f64
}
