// src/strategy/optimization.rs

//! Closed-form inventory parameters reported next to the searched order quantity.
//!
//! Only the order quantity comes out of the tree search; the reorder point and
//! safety stock are simple functions of the demand statistics.

/// Multiple of mean daily demand at which a reorder is triggered.
pub const REORDER_POINT_FACTOR: f64 = 1.5;

/// Z-score for a ~95% cycle service level.
pub const SERVICE_LEVEL_Z: f64 = 1.65;

/// Stock level at which to place the next order.
///
/// Formula: ReorderPoint = 1.5 × MeanDemand
pub fn reorder_point(mean_demand: f64) -> f64 {
    mean_demand * REORDER_POINT_FACTOR
}

/// Buffer held against demand variability.
///
/// Formula: SafetyStock = Z × StdDevDemand, with Z = 1.65
pub fn safety_stock(std_dev_demand: f64) -> f64 {
    std_dev_demand * SERVICE_LEVEL_Z
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristics_scale_linearly() {
        assert_eq!(reorder_point(10.0), 15.0);
        assert!((safety_stock(2.0) - 3.3).abs() < 1e-12);
        assert_eq!(safety_stock(0.0), 0.0);
    }
}
