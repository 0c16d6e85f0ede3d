// src/model/action_space.rs

use std::ops::Index;

/// Number of evenly spaced non-zero order quantities offered to the search.
pub const ACTION_STEPS: usize = 10;

/// Smallest non-zero order quantity in the grid.
const MIN_POSITIVE_ORDER: f64 = 0.1;

/// Sorted, deduplicated set of candidate order quantities.
///
/// Built once per optimization run and shared read-only by every search node;
/// nodes refer to actions by index into this vector.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionSpace {
    quantities: Vec<f64>,
}

impl ActionSpace {
    /// `{0} ∪ linspace(0.1, 3 × mean_demand, 10)`.
    ///
    /// With a zero (or non-finite) mean demand the grid collapses to `{0}`,
    /// so the search can only ever recommend not reordering.
    pub fn from_mean_demand(mean_demand: f64) -> Self {
        if !(mean_demand.is_finite() && mean_demand > 0.0) {
            return Self::from_quantities(vec![0.0]);
        }

        let mut quantities = Vec::with_capacity(ACTION_STEPS + 1);
        quantities.push(0.0);
        quantities.extend(linspace(MIN_POSITIVE_ORDER, mean_demand * 3.0, ACTION_STEPS));

        let space = Self::from_quantities(quantities);
        tracing::debug!(mean_demand, actions = ?space.quantities, "built action space");
        space
    }

    /// Builds a space from arbitrary quantities: negatives and non-finite
    /// values are discarded, the rest sorted ascending and deduplicated.
    pub fn from_quantities(mut quantities: Vec<f64>) -> Self {
        quantities.retain(|q| q.is_finite() && *q >= 0.0);
        quantities.sort_by(|a, b| a.total_cmp(b));
        quantities.dedup();
        Self { quantities }
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.quantities.get(index).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.quantities
    }
}

impl Index<usize> for ActionSpace {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.quantities[index]
    }
}

/// `count` evenly spaced values from `start` to `stop`, both inclusive.
fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}
