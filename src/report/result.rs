// src/report/result.rs

use serde::{Deserialize, Serialize};

use crate::model::DemandProfile;
use crate::report::bullwhip::{bullwhip_reduction, BullwhipReduction};
use crate::search::SearchOutcome;
use crate::strategy::optimization::{reorder_point, safety_stock};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimalAction {
    pub reorder_point: f64,
    pub order_quantity: f64,
    pub safety_stock: f64,
}

impl OptimalAction {
    /// The "no recommendation" value.
    pub fn none() -> Self {
        Self {
            reorder_point: 0.0,
            order_quantity: 0.0,
            safety_stock: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedSavings {
    pub amount: f64,
    pub percentage: f64,
}

impl ExpectedSavings {
    /// Reported when there is no recommendation to compare.
    pub fn none() -> Self {
        Self {
            amount: 0.0,
            percentage: 0.0,
        }
    }

    /// Savings relative to the baseline. A zero baseline reports 0%.
    pub fn against_baseline(baseline_cost: f64, optimized_cost: f64) -> Self {
        let amount = baseline_cost - optimized_cost;
        let percentage = if baseline_cost != 0.0 {
            amount / baseline_cost * 100.0
        } else {
            0.0
        };
        Self { amount, percentage }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub iterations: u32,
    pub explored_states: u64,
    pub computation_time_ms: f64,
    pub baseline_cost: f64,
    pub optimized_cost: f64,
}

/// Everything one optimization call reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationReport {
    pub optimal_action: OptimalAction,
    pub expected_savings: ExpectedSavings,
    pub bullwhip_reduction: BullwhipReduction,
    pub simulation_stats: SimulationStats,
}

impl OptimizationReport {
    /// Assembles the report from the search outcome and baseline cost.
    ///
    /// Without a recommended action every field of `optimal_action` is 0,
    /// as are the optimized cost and the savings. The baseline cost is still
    /// reported.
    pub fn synthesize(
        profile: &DemandProfile,
        outcome: &SearchOutcome,
        baseline_cost: f64,
    ) -> Self {
        let optimal_action = match outcome.best {
            Some(best) => OptimalAction {
                reorder_point: reorder_point(profile.mean()),
                order_quantity: best.order_quantity,
                safety_stock: safety_stock(profile.std_dev()),
            },
            None => OptimalAction::none(),
        };

        let optimized_cost = outcome.expected_cost();
        let expected_savings = match outcome.best {
            Some(_) => ExpectedSavings::against_baseline(baseline_cost, optimized_cost),
            None => ExpectedSavings::none(),
        };

        Self {
            optimal_action,
            expected_savings,
            bullwhip_reduction: bullwhip_reduction(
                profile.variance(),
                optimal_action.order_quantity,
            ),
            simulation_stats: SimulationStats {
                iterations: outcome.iterations,
                explored_states: outcome.explored_states,
                computation_time_ms: outcome.computation_time_ms,
                baseline_cost,
                optimized_cost,
            },
        }
    }

    /// True when the search produced no recommendation.
    pub fn is_degenerate(&self) -> bool {
        self.optimal_action == OptimalAction::none() && self.simulation_stats.optimized_cost == 0.0
    }
}

/// A report with the explanatory text attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainedReport {
    #[serde(flatten)]
    pub report: OptimizationReport,
    pub interpretation: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{BestAction, RewardScale};

    fn outcome(best: Option<BestAction>) -> SearchOutcome {
        SearchOutcome {
            best,
            scale: RewardScale::from_max_penalty(1000.0),
            iterations: 10,
            explored_states: 4,
            computation_time_ms: 1.0,
        }
    }

    #[test]
    fn only_order_quantity_comes_from_the_search() {
        let profile = DemandProfile::new(vec![8.0, 12.0], 0.0).unwrap();
        let best = BestAction {
            action_index: 3,
            order_quantity: 9.0,
            visits: 6,
            average_reward: 0.9,
        };

        let report = OptimizationReport::synthesize(&profile, &outcome(Some(best)), 400.0);

        assert_eq!(report.optimal_action.order_quantity, 9.0);
        assert_eq!(report.optimal_action.reorder_point, 15.0);
        assert!((report.optimal_action.safety_stock - 3.3).abs() < 1e-9);
        assert!((report.simulation_stats.optimized_cost - 100.0).abs() < 1e-9);
        assert!((report.expected_savings.amount - 300.0).abs() < 1e-9);
        assert!((report.expected_savings.percentage - 75.0).abs() < 1e-9);
    }

    #[test]
    fn missing_recommendation_is_all_zero() {
        let profile = DemandProfile::new(vec![8.0, 12.0], 0.0).unwrap();
        let report = OptimizationReport::synthesize(&profile, &outcome(None), 0.0);

        assert!(report.is_degenerate());
        assert_eq!(report.expected_savings, ExpectedSavings::none());
    }

    #[test]
    fn missing_recommendation_claims_no_savings_over_a_costly_baseline() {
        let profile = DemandProfile::new(vec![8.0, 12.0], 0.0).unwrap();
        let report = OptimizationReport::synthesize(&profile, &outcome(None), 12_450.0);

        assert!(report.is_degenerate());
        assert_eq!(report.simulation_stats.baseline_cost, 12_450.0);
        assert_eq!(report.expected_savings.amount, 0.0);
        assert_eq!(report.expected_savings.percentage, 0.0);
    }

    #[test]
    fn serializes_with_documented_field_names() {
        let profile = DemandProfile::new(vec![10.0], 0.0).unwrap();
        let report = OptimizationReport::synthesize(&profile, &outcome(None), 50.0);
        let explained = ExplainedReport {
            report,
            interpretation: "hold".to_string(),
        };

        let value = serde_json::to_value(&explained).unwrap();
        for key in [
            "optimal_action",
            "expected_savings",
            "bullwhip_reduction",
            "simulation_stats",
            "interpretation",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert!(value["simulation_stats"].get("explored_states").is_some());
        assert!(value["bullwhip_reduction"].get("improvement_percentage").is_some());
    }
}
