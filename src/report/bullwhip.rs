// src/report/bullwhip.rs

//! Coarse Bullwhip indicator for reporting.
//!
//! This is an illustrative heuristic, not a measurement: order variance is
//! approximated as `0.5 × order_quantity²` and compared against a typical
//! unoptimized ratio of 2.4.

use serde::{Deserialize, Serialize};

/// Var(orders) / Var(demand) assumed for an unmanaged supply chain.
pub const BASELINE_BULLWHIP_RATIO: f64 = 2.4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BullwhipReduction {
    pub before: f64,
    pub after: f64,
    pub improvement_percentage: f64,
}

/// Compares the recommended order's variance proxy against the baseline ratio.
///
/// With zero demand variance the ratio is taken as 1. `after` never exceeds
/// `before` and the improvement never goes below zero.
pub fn bullwhip_reduction(demand_variance: f64, order_quantity: f64) -> BullwhipReduction {
    let order_variance = order_quantity * order_quantity * 0.5;

    let ratio = if demand_variance > 0.0 {
        order_variance / demand_variance
    } else {
        1.0
    };

    let improvement = (BASELINE_BULLWHIP_RATIO - ratio) / BASELINE_BULLWHIP_RATIO * 100.0;

    BullwhipReduction {
        before: BASELINE_BULLWHIP_RATIO,
        after: ratio.min(BASELINE_BULLWHIP_RATIO),
        improvement_percentage: improvement.max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_orders_report_improvement() {
        // order variance 0.5 × 4² = 8, demand variance 10 -> ratio 0.8
        let r = bullwhip_reduction(10.0, 4.0);
        assert_eq!(r.before, 2.4);
        assert!((r.after - 0.8).abs() < 1e-12);
        assert!((r.improvement_percentage - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn large_orders_are_clamped() {
        let r = bullwhip_reduction(1.0, 100.0);
        assert_eq!(r.after, 2.4);
        assert_eq!(r.improvement_percentage, 0.0);
    }

    #[test]
    fn constant_demand_uses_unit_ratio() {
        let r = bullwhip_reduction(0.0, 50.0);
        assert_eq!(r.after, 1.0);
        assert!((r.improvement_percentage - (1.4 / 2.4 * 100.0)).abs() < 1e-9);
    }
}
