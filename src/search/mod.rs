pub mod mcts;
pub mod tree;

pub use mcts::{BestAction, Mcts, RewardScale, SearchOutcome, EXPLORATION};
pub use tree::{NodeId, SearchNode, SearchTree, UntriedActions};
