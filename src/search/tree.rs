//! Arena storage for the search tree.
//!
//! Nodes live in one growable vector and refer to each other by [`NodeId`].
//! A parent owns its children through the index list it holds; the parent
//! link on a child is a plain index used only to walk back up during
//! backpropagation.

use std::ops::{Index, IndexMut};

use crate::model::InventoryState;

/// Index of a node inside its [`SearchTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Action indices a node has not expanded yet.
///
/// Kept as a descending stack so the lowest remaining index pops first.
/// Every node gets its own instance; siblings never share one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntriedActions {
    stack: Vec<usize>,
}

impl UntriedActions {
    /// All indices `0..action_count`.
    pub fn full(action_count: usize) -> Self {
        Self {
            stack: (0..action_count).rev().collect(),
        }
    }

    /// Removes and returns the lowest remaining index.
    pub fn take_lowest(&mut self) -> Option<usize> {
        self.stack.pop()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.stack.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct SearchNode {
    /// State observed when this node was created.
    pub(crate) state: InventoryState,
    /// Index into the action space of the order that led here. `None` at the root.
    pub(crate) action: Option<usize>,
    pub(crate) parent: Option<NodeId>,
    /// Children in expansion order, which is ascending action index.
    pub(crate) children: Vec<NodeId>,
    pub(crate) visits: u32,
    /// Sum of backpropagated rewards, each in `[0, 1]`.
    pub(crate) total_reward: f64,
    pub(crate) untried: UntriedActions,
}

impl SearchNode {
    fn new(
        state: InventoryState,
        action: Option<usize>,
        parent: Option<NodeId>,
        action_count: usize,
    ) -> Self {
        Self {
            state,
            action,
            parent,
            children: Vec::new(),
            visits: 0,
            total_reward: 0.0,
            untried: UntriedActions::full(action_count),
        }
    }

    pub fn state(&self) -> &InventoryState {
        &self.state
    }

    pub fn action(&self) -> Option<usize> {
        self.action
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn visits(&self) -> u32 {
        self.visits
    }

    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    pub fn untried(&self) -> &UntriedActions {
        &self.untried
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    /// Mean reward, or 0 for a node that was never visited.
    pub fn average_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward / self.visits as f64
        }
    }

    /// UCB1 score relative to a parent with `parent_visits` visits.
    ///
    /// Undefined for unvisited nodes; callers skip those.
    pub fn ucb1(&self, parent_visits: u32, exploration: f64) -> f64 {
        debug_assert!(self.visits > 0);
        let visits = self.visits as f64;
        let exploit = self.total_reward / visits;
        let explore = exploration * ((parent_visits.max(1) as f64).ln() / visits).sqrt();
        exploit + explore
    }
}

/// Owns every node of one search. The root is always at index 0.
#[derive(Debug, Clone)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
    action_count: usize,
}

impl SearchTree {
    pub fn new(root_state: InventoryState, action_count: usize) -> Self {
        Self {
            nodes: vec![SearchNode::new(root_state, None, None, action_count)],
            action_count,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn action_count(&self) -> usize {
        self.action_count
    }

    /// Attaches a new child reached by `action` and returns its id.
    ///
    /// The child starts with every action untried. The caller must already
    /// have removed `action` from the parent's untried set.
    pub fn add_child(&mut self, parent: NodeId, action: usize, state: InventoryState) -> NodeId {
        debug_assert!(!self[parent].untried.contains(action));
        let id = NodeId(self.nodes.len());
        self.nodes
            .push(SearchNode::new(state, Some(action), Some(parent), self.action_count));
        self[parent].children.push(id);
        id
    }

    /// Child of `parent` with the highest UCB1 score.
    ///
    /// Ties go to the earliest child (lowest action index). Unvisited
    /// children are never candidates.
    pub fn select_child(&self, parent: NodeId, exploration: f64) -> Option<NodeId> {
        let parent_visits = self[parent].visits;
        let mut best: Option<(NodeId, f64)> = None;

        for &child in &self[parent].children {
            let node = &self[child];
            if node.visits == 0 {
                continue;
            }
            let score = node.ucb1(parent_visits, exploration);
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((child, score)),
            }
        }

        best.map(|(id, _)| id)
    }

    /// Child of `parent` with the most visits; ties go to the earliest child.
    pub fn most_visited_child(&self, parent: NodeId) -> Option<NodeId> {
        let mut best: Option<NodeId> = None;
        for &child in &self[parent].children {
            match best {
                Some(top) if self[child].visits <= self[top].visits => {}
                _ => best = Some(child),
            }
        }
        best
    }

    /// Adds one visit and `reward` to `leaf` and every ancestor up to the root.
    pub fn backpropagate(&mut self, leaf: NodeId, reward: f64) {
        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = &mut self[id];
            node.visits += 1;
            node.total_reward += reward;
            current = node.parent;
        }
    }
}

impl Index<NodeId> for SearchTree {
    type Output = SearchNode;

    fn index(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for SearchTree {
    fn index_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0]
    }
}
