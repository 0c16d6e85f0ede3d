// src/search/mcts.rs

use std::time::Instant;

use rand::RngCore;
use serde::Serialize;
use tracing::{info, warn};

use crate::model::{ActionSpace, CostRates, InventoryState};
use crate::search::tree::{NodeId, SearchTree};
use crate::simulation::engine::PolicySimulation;
use crate::simulation::sampler::DemandSampler;
use crate::strategy::UniformRandomPolicy;

/// UCB1 exploration constant, fixed at √2.
pub const EXPLORATION: f64 = std::f64::consts::SQRT_2;

/// Maps rollout costs onto rewards in `[0, 1]`.
///
/// The scale is `stockout_cost × 2 × mean_demand × horizon`, roughly the
/// cost of stocking out on every day of the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RewardScale {
    max_penalty: f64,
}

impl RewardScale {
    pub fn new(stockout_cost: f64, mean_demand: f64, horizon: u32) -> Self {
        let max_penalty = stockout_cost * (mean_demand * 2.0) * horizon as f64;
        Self::from_max_penalty(max_penalty)
    }

    /// A zero (or NaN) penalty is replaced by 1; an overflowed one
    /// saturates at `f64::MAX`.
    pub fn from_max_penalty(max_penalty: f64) -> Self {
        let max_penalty = if max_penalty.is_nan() || max_penalty <= 0.0 {
            1.0
        } else {
            max_penalty.min(f64::MAX)
        };
        Self { max_penalty }
    }

    pub fn max_penalty(&self) -> f64 {
        self.max_penalty
    }

    /// 1 for a free rollout, 0 for one at or beyond the penalty cap.
    pub fn reward(&self, cost: f64) -> f64 {
        let capped = cost.max(0.0).min(self.max_penalty);
        (1.0 - capped / self.max_penalty).clamp(0.0, 1.0)
    }

    /// Inverse of [`RewardScale::reward`] for a mean reward.
    pub fn cost(&self, reward: f64) -> f64 {
        (1.0 - reward) * self.max_penalty
    }
}

/// The root child recommended by a finished search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BestAction {
    pub action_index: usize,
    pub order_quantity: f64,
    pub visits: u32,
    pub average_reward: f64,
}

/// What a search run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// `None` when the root never got a child (no budget, zero horizon,
    /// or an empty action space).
    pub best: Option<BestAction>,
    pub scale: RewardScale,
    pub iterations: u32,
    /// Number of nodes created by expansion.
    pub explored_states: u64,
    pub computation_time_ms: f64,
}

impl SearchOutcome {
    /// De-normalized expected cost of the recommended action, or 0 without one.
    pub fn expected_cost(&self) -> f64 {
        self.best
            .map(|b| self.scale.cost(b.average_reward))
            .unwrap_or(0.0)
    }
}

/// Monte Carlo Tree Search over order quantities.
///
/// Each iteration walks Selection → Expansion → Simulation → Backpropagation
/// against a fresh simulated state starting at day 0. The tree is built for a
/// single call to [`Mcts::search`] and dropped afterwards.
#[derive(Debug, Clone, Copy)]
pub struct Mcts<'a> {
    actions: &'a ActionSpace,
    sampler: DemandSampler<'a>,
    costs: CostRates,
    horizon: u32,
    scale: RewardScale,
}

impl<'a> Mcts<'a> {
    pub fn new(
        actions: &'a ActionSpace,
        sampler: DemandSampler<'a>,
        costs: CostRates,
        horizon: u32,
        scale: RewardScale,
    ) -> Self {
        Self {
            actions,
            sampler,
            costs,
            horizon,
            scale,
        }
    }

    pub fn search<R: RngCore>(
        &self,
        start: InventoryState,
        iterations: u32,
        rng: &mut R,
    ) -> SearchOutcome {
        let started = Instant::now();
        let (tree, explored_states) = self.build_tree(start, iterations, rng);
        let best = self.best_action(&tree);
        let computation_time_ms = started.elapsed().as_secs_f64() * 1000.0;

        match best {
            Some(best) => info!(
                order_quantity = best.order_quantity,
                visits = best.visits,
                average_reward = best.average_reward,
                explored_states,
                computation_time_ms,
                "search finished"
            ),
            None => warn!(iterations, horizon = self.horizon, "search expanded no root action"),
        }

        SearchOutcome {
            best,
            scale: self.scale,
            iterations,
            explored_states,
            computation_time_ms,
        }
    }

    /// Runs the iteration budget and returns the tree with the expansion count.
    pub fn build_tree<R: RngCore>(
        &self,
        start: InventoryState,
        iterations: u32,
        rng: &mut R,
    ) -> (SearchTree, u64) {
        let mut tree = SearchTree::new(start, self.actions.len());
        let rollout = PolicySimulation::new(self.actions, self.sampler, self.costs, self.horizon);
        let mut rollout_policy = UniformRandomPolicy::new();
        let mut explored_states = 0u64;

        for _ in 0..iterations {
            let mut node = tree.root();
            let mut state = start;

            // Selection
            while tree[node].is_fully_expanded() && !state.is_terminal(self.horizon) {
                let Some(child) = tree.select_child(node, EXPLORATION) else {
                    break;
                };
                node = child;
                state = self.advance(&state, &tree, node, rng);
            }

            // Expansion
            if !state.is_terminal(self.horizon) {
                if let Some(action) = tree[node].untried.take_lowest() {
                    let demand = self.sampler.sample(rng);
                    state = state.transition(self.actions[action], demand, &self.costs);
                    node = tree.add_child(node, action, state);
                    explored_states += 1;
                }
            }

            // Simulation
            let end = rollout.run(state, &mut rollout_policy, rng);

            // Backpropagation
            let reward = self.scale.reward(end.cumulative_cost);
            tree.backpropagate(node, reward);
        }

        (tree, explored_states)
    }

    /// Most-visited root child, or `None` if the root was never expanded.
    pub fn best_action(&self, tree: &SearchTree) -> Option<BestAction> {
        let id = tree.most_visited_child(tree.root())?;
        let node = &tree[id];
        let action_index = node.action?;
        Some(BestAction {
            action_index,
            order_quantity: self.actions[action_index],
            visits: node.visits,
            average_reward: node.average_reward(),
        })
    }

    fn advance<R: RngCore>(
        &self,
        state: &InventoryState,
        tree: &SearchTree,
        node: NodeId,
        rng: &mut R,
    ) -> InventoryState {
        let order = tree[node].action.map(|i| self.actions[i]).unwrap_or(0.0);
        let demand = self.sampler.sample(rng);
        state.transition(order, demand, &self.costs)
    }
}
