//! Expansion of a leaf into one child per legal action.

use log::trace;

use crate::{
    game::{legal_transitions, MoveGenerator, PositionRules},
    tree::{NodeId, SearchTree},
};

/// Expands `node` with one child for every legal action of the side to move
///
/// Candidates come from `generator` and are kept only if `rules` accepts
/// them; rejected candidates are dropped silently. Children are appended in
/// the order of the returned actions, so action `i` leads to child `i`.
/// An empty result means the side to move has no legal action (or the game
/// is already decided), which is a game fact rather than an error.
///
/// # Panics
///
/// Panics if `node` has already been expanded.
pub fn expand<R, G>(
    tree: &mut SearchTree<R::Position, R::Action>,
    node: NodeId,
    rules: &R,
    generator: &G,
) -> Vec<R::Action>
where
    R: PositionRules + ?Sized,
    G: MoveGenerator<R> + ?Sized,
{
    tree.mark_expanded(node);

    let transitions = legal_transitions(rules, generator, tree.node(node).position());
    let mut actions = Vec::with_capacity(transitions.len());

    for (action, position) in transitions {
        tree.add_child(node, position, action.clone());
        actions.push(action);
    }

    trace!("expanded node {} into {} children", node, actions.len());
    actions
}
