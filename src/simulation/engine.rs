// src/simulation/engine.rs

use rand::RngCore;
use serde::Serialize;

use crate::model::{ActionSpace, CostRates, InventoryState};
use crate::simulation::sampler::DemandSampler;
use crate::strategy::implementations::NeverReorder;
use crate::strategy::traits::OrderPolicy;

// We make this Serialize so we can write it to CSV later
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayRecord {
    pub day: u32,
    pub opening_stock: f64,
    pub order_qty: f64,
    pub demand: f64,
    pub fulfilled: f64,
    pub stockout: f64,
    pub ending_stock: f64,
    pub day_cost: f64,
    pub cumulative_cost: f64,
}

/// Plays a policy forward day by day until the horizon.
///
/// Each day the policy picks an order first, then demand is drawn from the
/// bootstrap sampler and the transition model applies both.
#[derive(Debug, Clone, Copy)]
pub struct PolicySimulation<'a> {
    actions: &'a ActionSpace,
    sampler: DemandSampler<'a>,
    costs: CostRates,
    horizon: u32,
}

impl<'a> PolicySimulation<'a> {
    pub fn new(
        actions: &'a ActionSpace,
        sampler: DemandSampler<'a>,
        costs: CostRates,
        horizon: u32,
    ) -> Self {
        Self {
            actions,
            sampler,
            costs,
            horizon,
        }
    }

    /// Runs from `start` to the horizon and returns the final state.
    pub fn run<P, R>(&self, start: InventoryState, policy: &mut P, rng: &mut R) -> InventoryState
    where
        P: OrderPolicy + ?Sized,
        R: RngCore,
    {
        let mut state = start;
        while !state.is_terminal(self.horizon) {
            let order = policy.order_quantity(&state, self.actions, rng);
            let demand = self.sampler.sample(rng);
            state = state.transition(order, demand, &self.costs);
        }
        state
    }

    /// Same as [`PolicySimulation::run`], also recording every simulated day.
    pub fn run_with_trace<P, R>(
        &self,
        start: InventoryState,
        policy: &mut P,
        rng: &mut R,
    ) -> (InventoryState, Vec<DayRecord>)
    where
        P: OrderPolicy + ?Sized,
        R: RngCore,
    {
        let mut state = start;
        let mut history = Vec::with_capacity(self.horizon.saturating_sub(start.day) as usize);

        while !state.is_terminal(self.horizon) {
            let order = policy.order_quantity(&state, self.actions, rng);
            let demand = self.sampler.sample(rng);
            let (next, outcome) = state.step(order, demand, &self.costs);

            history.push(DayRecord {
                day: next.day,
                opening_stock: state.current_stock,
                order_qty: order,
                demand,
                fulfilled: outcome.fulfilled,
                stockout: outcome.stockout,
                ending_stock: outcome.ending_stock,
                day_cost: outcome.day_cost,
                cumulative_cost: next.cumulative_cost,
            });

            state = next;
        }

        (state, history)
    }
}

/// Plays the never-reorder policy along one bootstrap demand path.
///
/// Returns the final state (whose cumulative cost is the baseline cost) and
/// the per-day trace.
pub fn evaluate_baseline<R: RngCore>(
    start: InventoryState,
    sampler: DemandSampler<'_>,
    costs: CostRates,
    horizon: u32,
    rng: &mut R,
) -> (InventoryState, Vec<DayRecord>) {
    let no_reorder = ActionSpace::from_quantities(vec![0.0]);
    PolicySimulation::new(&no_reorder, sampler, costs, horizon).run_with_trace(
        start,
        &mut NeverReorder::new(),
        rng,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::UniformRandomPolicy;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn runs_exactly_to_the_horizon() {
        let actions = ActionSpace::from_quantities(vec![0.0, 5.0]);
        let history = [4.0, 6.0];
        let sim = PolicySimulation::new(&actions, DemandSampler::new(&history), CostRates::new(1.0, 10.0), 7);
        let mut rng = StdRng::seed_from_u64(11);

        let end = sim.run(InventoryState::initial(10.0), &mut UniformRandomPolicy::new(), &mut rng);
        assert_eq!(end.day, 7);
    }

    #[test]
    fn trace_matches_final_state() {
        let actions = ActionSpace::from_quantities(vec![0.0]);
        let history = [10.0];
        let sim = PolicySimulation::new(&actions, DemandSampler::new(&history), CostRates::new(1.0, 10.0), 3);
        let mut rng = StdRng::seed_from_u64(0);

        let (end, trace) = sim.run_with_trace(InventoryState::initial(10.0), &mut NeverReorder::new(), &mut rng);

        assert_eq!(trace.len(), 3);
        assert_eq!(trace[0].day_cost, 0.0);
        assert_eq!(trace[1].stockout, 10.0);
        assert_eq!(trace[2].cumulative_cost, end.cumulative_cost);
        assert_eq!(end.cumulative_cost, 200.0);
    }

    #[test]
    fn baseline_from_empty_shelf_is_pure_stockout() {
        let history = [3.0, 7.0, 12.0];
        let costs = CostRates::new(4.0, 9.0);
        let mut rng = StdRng::seed_from_u64(21);

        let (end, trace) = evaluate_baseline(InventoryState::initial(0.0), DemandSampler::new(&history), costs, 20, &mut rng);

        let total_demand: f64 = trace.iter().map(|r| r.demand).sum();
        assert_eq!(end.cumulative_cost, costs.stockout * total_demand);
        assert!(trace.iter().all(|r| r.order_qty == 0.0 && r.ending_stock == 0.0));
    }

    #[test]
    fn terminal_start_does_nothing() {
        let actions = ActionSpace::from_quantities(vec![0.0]);
        let history = [10.0];
        let sim = PolicySimulation::new(&actions, DemandSampler::new(&history), CostRates::new(1.0, 10.0), 0);
        let mut rng = StdRng::seed_from_u64(0);

        let (end, trace) = sim.run_with_trace(InventoryState::initial(3.0), &mut NeverReorder::new(), &mut rng);
        assert!(trace.is_empty());
        assert_eq!(end.cumulative_cost, 0.0);
    }
}
