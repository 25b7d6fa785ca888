//! Arena-backed search tree for Monte Carlo Tree Search
//!
//! Nodes live in a single `Vec` owned by [`SearchTree`] and refer to each
//! other through [`NodeId`] indices. The parent link is a plain index, so
//! moving or dropping the tree never has to untangle ownership cycles.

use std::fmt::{self, Debug, Write};

use crate::game::{Position, Side};

/// Index of a node inside a [`SearchTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in the search tree
///
/// Holds a position snapshot that is never mutated after creation, the
/// statistics accumulated by backpropagation and the links to its relatives.
#[derive(Debug, Clone)]
pub struct SearchNode<P, A> {
    position: P,

    /// The action that led here from the parent (None for the root)
    action: Option<A>,

    /// Side that played `action` (None for the root)
    mover: Option<Side>,

    visits: u64,
    score: f64,

    parent: Option<NodeId>,
    children: Vec<NodeId>,
    expanded: bool,

    /// Distance from the root (root = 0)
    depth: usize,
}

impl<P, A> SearchNode<P, A> {
    fn new(
        position: P,
        action: Option<A>,
        mover: Option<Side>,
        parent: Option<NodeId>,
        depth: usize,
    ) -> Self {
        SearchNode {
            position,
            action,
            mover,
            visits: 0,
            score: 0.0,
            parent,
            children: Vec::new(),
            expanded: false,
            depth,
        }
    }

    /// Returns the position this node represents
    pub fn position(&self) -> &P {
        &self.position
    }

    /// Returns the action that led to this node
    pub fn action(&self) -> Option<&A> {
        self.action.as_ref()
    }

    /// Returns the side whose move produced this node
    pub fn mover(&self) -> Option<Side> {
        self.mover
    }

    /// Returns the number of visits to this node
    pub fn visits(&self) -> u64 {
        self.visits
    }

    /// Returns the accumulated win credit
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Returns the mean credit per visit, 0 for an unvisited node
    pub fn mean_score(&self) -> f64 {
        crate::utils::mean_score(self.score, self.visits)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in expansion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns true once the node has been expanded, even if that produced no children
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Returns true if the node has no children in the tree built so far
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Increments the visit count
    pub fn increment_visits(&mut self) {
        self.visits += 1;
    }

    /// Adds credit to the accumulated score
    pub fn add_score(&mut self, amount: f64) {
        self.score += amount;
    }
}

/// The game tree built by one search
#[derive(Debug, Clone)]
pub struct SearchTree<P, A> {
    nodes: Vec<SearchNode<P, A>>,
}

impl<P: Position, A: Debug> SearchTree<P, A> {
    /// Creates a tree holding only a root node for `position`
    pub fn new(position: P) -> Self {
        SearchTree {
            nodes: vec![SearchNode::new(position, None, None, None, 0)],
        }
    }

    /// Returns the root node ID
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &SearchNode<P, A> {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut SearchNode<P, A> {
        &mut self.nodes[id.0]
    }

    /// Returns the number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree owns at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends a child reached from `parent` by `action`
    ///
    /// Only the parent's child list changes; no statistics are touched. The
    /// mover recorded on the child is the parent's side to move.
    pub fn add_child(&mut self, parent: NodeId, position: P, action: A) -> NodeId {
        let id = NodeId(self.nodes.len());
        let (mover, depth) = {
            let parent_node = self.node(parent);
            (parent_node.position.side_to_move(), parent_node.depth + 1)
        };

        self.nodes
            .push(SearchNode::new(position, Some(action), mover, Some(parent), depth));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Records that `id` has been expanded
    ///
    /// # Panics
    ///
    /// Panics if the node was already expanded. Expansion happens at most once.
    pub fn mark_expanded(&mut self, id: NodeId) {
        let node = self.node_mut(id);
        assert!(!node.expanded, "node {} expanded twice", id);
        node.expanded = true;
    }

    /// Returns the child with the highest accumulated score, first one on ties
    ///
    /// # Panics
    ///
    /// Panics if the node has no children.
    pub fn best_child_by_score(&self, id: NodeId) -> NodeId {
        self.best_child_by(id, |child| child.score)
    }

    /// Returns the child with the most visits, first one on ties
    ///
    /// # Panics
    ///
    /// Panics if the node has no children.
    pub fn best_child_by_visits(&self, id: NodeId) -> NodeId {
        self.best_child_by(id, |child| child.visits as f64)
    }

    /// Returns the child with the highest mean score, first one on ties
    ///
    /// # Panics
    ///
    /// Panics if the node has no children.
    pub fn best_child_by_mean(&self, id: NodeId) -> NodeId {
        self.best_child_by(id, |child| child.mean_score())
    }

    fn best_child_by<F>(&self, id: NodeId, key: F) -> NodeId
    where
        F: Fn(&SearchNode<P, A>) -> f64,
    {
        let children = self.node(id).children();
        assert!(!children.is_empty(), "best child requested from childless node {}", id);

        let mut best = children[0];
        let mut best_value = key(self.node(best));
        for &child in &children[1..] {
            let value = key(self.node(child));
            if value > best_value {
                best_value = value;
                best = child;
            }
        }
        best
    }

    /// Returns the deepest node depth in the tree
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|node| node.depth).max().unwrap_or(0)
    }

    /// Renders the tree as an indented list of `action (visits, score, mean)` lines
    pub fn render(&self) -> String {
        let mut output = String::new();
        self.render_node(self.root(), &mut output);
        output
    }

    fn render_node(&self, id: NodeId, output: &mut String) {
        let node = self.node(id);
        let indent = "  ".repeat(node.depth);
        let label = match &node.action {
            Some(action) => format!("{:?}", action),
            None => "Root".to_string(),
        };

        // Writing into a String cannot fail.
        let _ = writeln!(
            output,
            "{}{} (visits: {}, score: {:.1}, mean: {:.3})",
            indent,
            label,
            node.visits,
            node.score,
            node.mean_score()
        );

        for &child in &node.children {
            self.render_node(child, output);
        }
    }
}
