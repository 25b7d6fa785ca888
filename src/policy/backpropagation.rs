//! Backpropagation policies for the MCTS algorithm
//!
//! Backpropagation policies determine how to update node statistics
//! after a simulation.

use std::fmt::Debug;

use crate::{
    game::{Outcome, Position, Side},
    tree::{NodeId, SearchNode, SearchTree},
};

/// Trait for policies that backpropagate simulation results
pub trait BackpropagationPolicy<P: Position, A: Debug>: Send + Sync {
    /// Updates statistics for one node
    ///
    /// `mover` is the side whose move led into the node.
    fn update_stats(&self, node: &mut SearchNode<P, A>, outcome: Outcome, mover: Side);

    /// Walks from `leaf` up to the root, inclusive, updating every node on the way
    ///
    /// The root has no incoming move; it is treated as reached by the
    /// opponent of `perspective`, the side the search runs for.
    fn backpropagate(
        &self,
        tree: &mut SearchTree<P, A>,
        leaf: NodeId,
        outcome: Outcome,
        perspective: Side,
    ) {
        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = tree.node_mut(id);
            let mover = node.mover().unwrap_or_else(|| perspective.opponent());
            self.update_stats(node, outcome, mover);
            current = node.parent();
        }
    }
}

/// Fixed win-credit backpropagation
///
/// Every node on the path gets one visit. A node is credited `win_score`
/// when the side that moved into it won, `draw_score` on a draw whatever the
/// side, and nothing on a loss. Crediting the mover keeps sibling scores
/// comparable from their parent's point of view.
#[derive(Debug, Clone)]
pub struct WinCreditPolicy {
    /// Credit for a win of the mover
    pub win_score: f64,

    /// Credit for a draw
    pub draw_score: f64,
}

impl WinCreditPolicy {
    /// Creates a new policy with the given credits
    pub fn new(win_score: f64, draw_score: f64) -> Self {
        WinCreditPolicy {
            win_score,
            draw_score,
        }
    }

    /// Returns the credit due to `mover` for `outcome`
    pub fn credit(&self, outcome: Outcome, mover: Side) -> f64 {
        match outcome {
            Outcome::Win(winner) if winner == mover => self.win_score,
            Outcome::Win(_) => 0.0,
            Outcome::Draw => self.draw_score,
        }
    }
}

impl Default for WinCreditPolicy {
    fn default() -> Self {
        Self::new(3.0, 1.0)
    }
}

impl<P: Position, A: Debug> BackpropagationPolicy<P, A> for WinCreditPolicy {
    fn update_stats(&self, node: &mut SearchNode<P, A>, outcome: Outcome, mover: Side) {
        node.increment_visits();
        node.add_score(self.credit(outcome, mover));
    }
}

// Implement BackpropagationPolicy for Box<dyn BackpropagationPolicy>
impl<P: Position, A: Debug> BackpropagationPolicy<P, A> for Box<dyn BackpropagationPolicy<P, A>> {
    fn update_stats(&self, node: &mut SearchNode<P, A>, outcome: Outcome, mover: Side) {
        (**self).update_stats(node, outcome, mover)
    }
}
