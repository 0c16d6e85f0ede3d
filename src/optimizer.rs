//! End-to-end optimization: preparation, search, baseline and report.

use rand::RngCore;
use tracing::info;

use crate::error::Result;
use crate::io::Dataset;
use crate::model::{ActionSpace, DemandProfile, InventoryState};
use crate::report::OptimizationReport;
use crate::search::{Mcts, RewardScale};
use crate::simulation::engine::{evaluate_baseline, DayRecord};
use crate::simulation::{DemandSampler, OptimizerParams};

/// The report of one optimization call plus the baseline path it was
/// measured against.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationRun {
    pub report: OptimizationReport,
    pub baseline_trace: Vec<DayRecord>,
}

/// Recommends a next-period order quantity for a single item.
///
/// Every call builds and discards its own search tree; the optimizer holds
/// nothing but its parameters and can be shared freely.
#[derive(Debug, Clone)]
pub struct InventoryOptimizer {
    params: OptimizerParams,
}

impl InventoryOptimizer {
    pub fn new(params: OptimizerParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &OptimizerParams {
        &self.params
    }

    /// Extracts demand and stock from `dataset` and optimizes with the
    /// configured random source.
    pub fn optimize_dataset(&self, dataset: &Dataset) -> Result<OptimizationRun> {
        let profile = dataset.demand_profile()?;
        let mut rng = self.params.rng();
        Ok(self.optimize(&profile, &mut rng))
    }

    /// Runs the search and the never-reorder baseline from `rng`.
    ///
    /// The same profile, parameters and seeded generator always produce the
    /// same report, timing aside.
    pub fn optimize<R: RngCore>(&self, profile: &DemandProfile, rng: &mut R) -> OptimizationRun {
        let params = &self.params;
        let costs = params.cost_rates();

        info!(
            iterations = params.iterations,
            horizon = params.horizon,
            current_stock = profile.current_stock(),
            holding_cost = costs.holding,
            stockout_cost = costs.stockout,
            "starting search"
        );

        let actions = ActionSpace::from_mean_demand(profile.mean());
        let sampler = DemandSampler::new(profile.observations());
        let scale = RewardScale::new(costs.stockout, profile.mean(), params.horizon);
        let start = InventoryState::initial(profile.current_stock());

        let mcts = Mcts::new(&actions, sampler, costs, params.horizon, scale);
        let outcome = mcts.search(start, params.iterations, rng);

        let (baseline_end, baseline_trace) =
            evaluate_baseline(start, sampler, costs, params.horizon, rng);

        let report =
            OptimizationReport::synthesize(profile, &outcome, baseline_end.cumulative_cost);
        info!(
            savings_percentage = report.expected_savings.percentage,
            baseline_cost = report.simulation_stats.baseline_cost,
            "optimization complete"
        );

        OptimizationRun {
            report,
            baseline_trace,
        }
    }
}
