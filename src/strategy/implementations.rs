// src/strategy/implementations.rs

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::model::{ActionSpace, InventoryState};
use crate::strategy::traits::OrderPolicy;

// =========================================================================
// 1. Never Reorder (Baseline)
// =========================================================================

/// The do-nothing strategy: live off the current stock and never order.
/// Savings are reported relative to this policy.
#[derive(Debug, Clone, Default)]
pub struct NeverReorder;

impl NeverReorder {
    pub fn new() -> Self {
        Self
    }
}

impl OrderPolicy for NeverReorder {
    fn order_quantity(
        &mut self,
        _state: &InventoryState,
        _actions: &ActionSpace,
        _rng: &mut dyn RngCore,
    ) -> f64 {
        0.0
    }
}

// =========================================================================
// 2. Uniform Random Policy (Rollout)
// =========================================================================

/// Picks any candidate quantity with equal probability, ignoring the state.
/// Used for MCTS rollouts past the edge of the tree.
#[derive(Debug, Clone, Default)]
pub struct UniformRandomPolicy;

impl UniformRandomPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl OrderPolicy for UniformRandomPolicy {
    fn order_quantity(
        &mut self,
        _state: &InventoryState,
        actions: &ActionSpace,
        rng: &mut dyn RngCore,
    ) -> f64 {
        actions.as_slice().choose(rng).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn never_reorder_always_orders_zero() {
        let actions = ActionSpace::from_quantities(vec![0.0, 5.0, 10.0]);
        let mut rng = StdRng::seed_from_u64(5);
        let mut policy = NeverReorder::new();

        for stock in [0.0, 3.0, 100.0] {
            let state = InventoryState::initial(stock);
            assert_eq!(policy.order_quantity(&state, &actions, &mut rng), 0.0);
        }
    }

    #[test]
    fn random_policy_stays_inside_action_space() {
        let actions = ActionSpace::from_quantities(vec![0.0, 5.0, 10.0]);
        let mut rng = StdRng::seed_from_u64(5);
        let mut policy = UniformRandomPolicy::new();
        let state = InventoryState::initial(1.0);

        let picks: Vec<f64> = (0..300)
            .map(|_| policy.order_quantity(&state, &actions, &mut rng))
            .collect();

        assert!(picks.iter().all(|q| actions.as_slice().contains(q)));
        for q in actions.as_slice() {
            assert!(picks.contains(q));
        }
    }

    #[test]
    fn random_policy_on_empty_space_orders_nothing() {
        let actions = ActionSpace::from_quantities(Vec::new());
        let mut rng = StdRng::seed_from_u64(5);
        let state = InventoryState::initial(1.0);
        assert_eq!(UniformRandomPolicy::new().order_quantity(&state, &actions, &mut rng), 0.0);
    }
}
