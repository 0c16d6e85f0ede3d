use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use reorder_planner::model::{ActionSpace, CostRates, InventoryState};
use reorder_planner::search::{Mcts, RewardScale};
use reorder_planner::simulation::DemandSampler;

proptest! {
    #[test]
    fn ending_stock_and_stockout_follow_inventory_physics(
        stock in 0.0f64..1_000.0,
        order in 0.0f64..1_000.0,
        demand in 0.0f64..1_000.0,
        holding in 0.0f64..100.0,
        stockout_cost in 0.0f64..100.0,
    ) {
        let costs = CostRates::new(holding, stockout_cost);
        let (next, outcome) = InventoryState::initial(stock).step(order, demand, &costs);

        prop_assert_eq!(next.current_stock, (stock + order - demand).max(0.0));
        prop_assert_eq!(outcome.stockout, (demand - (stock + order)).max(0.0));
        prop_assert!(!(outcome.ending_stock > 0.0 && outcome.stockout > 0.0));
        prop_assert_eq!(next.day, 1);
        prop_assert!(next.cumulative_cost >= 0.0);
    }

    #[test]
    fn reward_stays_in_unit_interval(
        stockout_cost in 0.0f64..1e9,
        mean_demand in 0.0f64..1e6,
        horizon in 0u32..400,
        cost in 0.0f64..1e15,
    ) {
        let reward = RewardScale::new(stockout_cost, mean_demand, horizon).reward(cost);
        prop_assert!((0.0..=1.0).contains(&reward));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn accumulated_reward_never_exceeds_visits(
        holding in 0.0f64..1e6,
        stockout_cost in 0.0f64..1e6,
        seed in any::<u64>(),
    ) {
        let history = [0.0, 4.0, 4.0, 25.0];
        let mean = history.iter().sum::<f64>() / history.len() as f64;
        let actions = ActionSpace::from_mean_demand(mean);
        let costs = CostRates::new(holding, stockout_cost);
        let mcts = Mcts::new(
            &actions,
            DemandSampler::new(&history),
            costs,
            6,
            RewardScale::new(stockout_cost, mean, 6),
        );
        let mut rng = StdRng::seed_from_u64(seed);

        let (tree, _) = mcts.build_tree(InventoryState::initial(3.0), 150, &mut rng);
        let root = &tree[tree.root()];
        prop_assert_eq!(root.visits(), 150);

        let mut stack = vec![tree.root()];
        while let Some(id) = stack.pop() {
            let node = &tree[id];
            prop_assert!(node.total_reward() >= 0.0);
            prop_assert!(node.total_reward() <= node.visits() as f64 + 1e-9);
            prop_assert_eq!(
                node.children().len() + node.untried().len(),
                tree.action_count()
            );
            stack.extend(node.children().iter().copied());
        }
    }
}
