//! Selection policies for the MCTS algorithm
//!
//! Selection policies determine which child to follow while descending the
//! tree, balancing exploration and exploitation.

use std::fmt::Debug;

use crate::{
    game::Position,
    tree::{NodeId, SearchTree},
    utils,
};

/// Trait for policies that pick the child to descend into
pub trait SelectionPolicy<P: Position, A: Debug>: Send + Sync {
    /// Selects a child of `node`
    ///
    /// # Panics
    ///
    /// Implementations panic if `node` has no children; descending into a
    /// childless node is a logic error in the caller.
    fn select_child(&self, tree: &SearchTree<P, A>, node: NodeId) -> NodeId;

    /// Walks from `from` through selected children until reaching a node
    /// without children in the tree built so far
    fn descend(&self, tree: &SearchTree<P, A>, from: NodeId) -> NodeId {
        let mut current = from;
        while !tree.node(current).is_leaf() {
            current = self.select_child(tree, current);
        }
        current
    }
}

/// Upper Confidence bound for Trees (UCT) selection policy
///
/// Scores every child with
///
/// ```text
/// UCT = score / visits + exploration_constant * sqrt(ln(parent_visits) / visits)
/// ```
///
/// An unvisited child scores positive infinity, so siblings are all tried
/// once before the statistics matter. Ties go to the first child in
/// expansion order.
#[derive(Debug, Clone)]
pub struct UctPolicy {
    /// Exploration constant `C`. Higher values favor less-visited children.
    pub exploration_constant: f64,
}

impl UctPolicy {
    /// Creates a new UCT policy with the given exploration constant
    pub fn new(exploration_constant: f64) -> Self {
        UctPolicy {
            exploration_constant,
        }
    }

    /// Calculates the UCT value for a child
    pub fn uct_value(&self, child_score: f64, child_visits: u64, parent_visits: u64) -> f64 {
        utils::uct_value(
            child_score,
            child_visits,
            parent_visits,
            self.exploration_constant,
        )
    }
}

impl Default for UctPolicy {
    fn default() -> Self {
        Self::new(1.41)
    }
}

impl<P: Position, A: Debug> SelectionPolicy<P, A> for UctPolicy {
    fn select_child(&self, tree: &SearchTree<P, A>, node: NodeId) -> NodeId {
        let parent = tree.node(node);
        let children = parent.children();
        assert!(
            !children.is_empty(),
            "selection reached childless node {}",
            node
        );

        let parent_visits = parent.visits();
        let mut best_value = f64::NEG_INFINITY;
        let mut best = children[0];

        for &id in children {
            let child = tree.node(id);
            let value = self.uct_value(child.score(), child.visits(), parent_visits);

            if value > best_value {
                best_value = value;
                best = id;
            }
        }

        best
    }
}

impl<P: Position, A: Debug> SelectionPolicy<P, A> for Box<dyn SelectionPolicy<P, A>> {
    fn select_child(&self, tree: &SearchTree<P, A>, node: NodeId) -> NodeId {
        (**self).select_child(tree, node)
    }
}
