//! The search driver
//!
//! This module orchestrates the four phases of selection, expansion,
//! simulation, and backpropagation under a wall-clock budget, then reads
//! the recommended action off the root.

use std::time::{Duration, Instant};

use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    config::{BestChildCriteria, SearchConfig},
    game::{MoveGenerator, Outcome, Position, PositionRules, Side},
    policy::{
        backpropagation::{BackpropagationPolicy, WinCreditPolicy},
        expansion::expand,
        selection::{SelectionPolicy, UctPolicy},
        simulation::{RandomPlayout, SimulationPolicy},
    },
    stats::SearchStatistics,
    tree::{NodeId, SearchTree},
    MCTSError, Result,
};

/// Lifecycle of a search driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// No search has started yet
    Idle,
    /// The iteration loop is running
    Running,
    /// The budget is spent and an answer has been extracted
    Done,
}

/// The tree a search over the rules `R` builds
pub type Tree<R> = SearchTree<<R as PositionRules>::Position, <R as PositionRules>::Action>;

/// Time-bounded Monte Carlo Tree Search move selector
///
/// Each call to [`choose_action`](Self::choose_action) builds a fresh tree
/// for the given position, iterates until the budget is spent, and returns
/// the recommended action. Nothing carries over between calls apart from
/// the random source.
pub struct MonteCarloSearch<R: PositionRules, G: MoveGenerator<R>> {
    rules: R,
    generator: G,

    /// Configuration for the search
    config: SearchConfig,

    /// Policy for selecting nodes during the selection phase
    selection_policy: Box<dyn SelectionPolicy<R::Position, R::Action>>,

    /// Policy for simulating games during the simulation phase
    simulation_policy: Box<dyn SimulationPolicy<R>>,

    /// Policy for backpropagating results
    backpropagation_policy: Box<dyn BackpropagationPolicy<R::Position, R::Action>>,

    /// The single random source used for child picks and playouts
    rng: StdRng,

    phase: SearchPhase,

    /// Statistics gathered during the last search
    statistics: SearchStatistics,

    /// Tree built by the last search, kept for inspection only
    last_tree: Option<Tree<R>>,
}

impl<R: PositionRules, G: MoveGenerator<R>> MonteCarloSearch<R, G> {
    /// Creates a new driver with the default UCT, random playout and win-credit policies
    ///
    /// The policies take their constants from `config`; the random source is
    /// seeded from `config.seed` when set.
    pub fn new(rules: R, generator: G, config: SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let selection_policy: Box<dyn SelectionPolicy<R::Position, R::Action>> =
            Box::new(UctPolicy::new(config.exploration_constant));

        let simulation_policy: Box<dyn SimulationPolicy<R>> =
            Box::new(RandomPlayout::new(config.max_playout_plies));

        let backpropagation_policy: Box<dyn BackpropagationPolicy<R::Position, R::Action>> =
            Box::new(WinCreditPolicy::new(config.win_score, config.draw_score));

        MonteCarloSearch {
            rules,
            generator,
            config,
            selection_policy,
            simulation_policy,
            backpropagation_policy,
            rng,
            phase: SearchPhase::Idle,
            statistics: SearchStatistics::new(),
            last_tree: None,
        }
    }

    /// Replaces the random source
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Sets the selection policy to use
    pub fn with_selection_policy<P>(mut self, policy: P) -> Self
    where
        P: SelectionPolicy<R::Position, R::Action> + 'static,
    {
        self.selection_policy = Box::new(policy);
        self
    }

    /// Sets the simulation policy to use
    pub fn with_simulation_policy<P: SimulationPolicy<R> + 'static>(mut self, policy: P) -> Self {
        self.simulation_policy = Box::new(policy);
        self
    }

    /// Sets the backpropagation policy to use
    pub fn with_backpropagation_policy<P>(mut self, policy: P) -> Self
    where
        P: BackpropagationPolicy<R::Position, R::Action> + 'static,
    {
        self.backpropagation_policy = Box::new(policy);
        self
    }

    /// Runs a search with the configured default budget
    pub fn search(&mut self, position: R::Position) -> Result<R::Action> {
        let budget = self.config.max_time;
        self.choose_action(position, budget)
    }

    /// Searches `position` for at most `budget` and returns the action to play
    ///
    /// At least one iteration always runs, so the budget can be overshot by
    /// the cost of a single iteration. Returns [`MCTSError::NoLegalAction`]
    /// when the game is already over or the side to move cannot move.
    pub fn choose_action(&mut self, position: R::Position, budget: Duration) -> Result<R::Action> {
        self.config.validate()?;

        self.statistics = SearchStatistics::new();
        self.last_tree = None;
        self.phase = SearchPhase::Running;
        debug!("search started with a budget of {:?}", budget);

        let start_time = Instant::now();
        let mut tree: Tree<R> = SearchTree::new(position);
        let root = tree.root();

        let root_position = tree.node(root).position();
        let side_to_move = root_position.side_to_move();
        let decided = self.rules.is_terminal(root_position);

        let perspective = match side_to_move {
            Some(side) if !decided => side,
            _ => {
                debug!("root position is already decided");
                self.finish(tree, start_time);
                return Err(MCTSError::NoLegalAction);
            }
        };

        let mut immediate_win = None;
        loop {
            self.execute_iteration(&mut tree, perspective);
            self.statistics.iterations += 1;

            if tree.node(root).is_leaf() {
                debug!("{} has no legal action, stopping", perspective);
                break;
            }

            if self.config.immediate_win_check {
                immediate_win = Self::find_immediate_win(&self.rules, &tree, perspective);
                if immediate_win.is_some() {
                    debug!("root action wins on the spot, stopping");
                    break;
                }
            }

            if start_time.elapsed() >= budget {
                self.statistics.budget_exhausted = true;
                break;
            }

            if let Some(max_iterations) = self.config.max_iterations {
                if self.statistics.iterations >= max_iterations {
                    break;
                }
            }
        }

        let best = immediate_win.or_else(|| self.select_best_child(&tree));
        let action = best
            .and_then(|id| tree.node(id).action().cloned())
            .ok_or(MCTSError::NoLegalAction);

        match &action {
            Ok(action) => info!(
                "{} plays {:?} after {} iterations in {:.3}s",
                perspective,
                action,
                self.statistics.iterations,
                start_time.elapsed().as_secs_f64()
            ),
            Err(_) => info!("{} has no legal action", perspective),
        }

        self.finish(tree, start_time);
        action
    }

    /// Execute a single iteration of the MCTS algorithm
    ///
    /// Every phase runs to completion; once a playout produced an outcome it
    /// is always backpropagated.
    fn execute_iteration(&mut self, tree: &mut Tree<R>, perspective: Side) {
        // 1. Selection
        let leaf = self.selection_policy.descend(tree, tree.root());

        // 2. Expansion
        let expandable = {
            let node = tree.node(leaf);
            !node.is_expanded()
                && node.position().side_to_move().is_some()
                && !self.rules.is_terminal(node.position())
        };
        if expandable {
            expand(tree, leaf, &self.rules, &self.generator);
        }

        let children = tree.node(leaf).children();
        let target = if children.is_empty() {
            leaf
        } else {
            children[self.rng.gen_range(0..children.len())]
        };

        // 3. Simulation
        let playout = self.simulation_policy.simulate(
            tree.node(target).position(),
            &self.rules,
            &self.generator,
            &mut self.rng,
        );
        self.statistics.playouts += 1;
        self.statistics.total_playout_plies += playout.plies;
        if playout.capped {
            self.statistics.playout_cap_hits += 1;
        }

        // 4. Backpropagation
        self.backpropagation_policy
            .backpropagate(tree, target, playout.outcome, perspective);
    }

    /// Returns the first root child whose position is already won by `perspective`
    fn find_immediate_win(rules: &R, tree: &Tree<R>, perspective: Side) -> Option<NodeId> {
        tree.node(tree.root())
            .children()
            .iter()
            .copied()
            .find(|&id| rules.winner(tree.node(id).position()) == Some(Outcome::Win(perspective)))
    }

    /// Selects the root child to play based on configured criteria
    fn select_best_child(&self, tree: &Tree<R>) -> Option<NodeId> {
        let root = tree.root();
        if tree.node(root).is_leaf() {
            return None;
        }

        Some(match self.config.best_child_criteria {
            BestChildCriteria::HighestScore => tree.best_child_by_score(root),
            BestChildCriteria::MostVisits => tree.best_child_by_visits(root),
            BestChildCriteria::HighestMean => tree.best_child_by_mean(root),
        })
    }

    fn finish(&mut self, tree: Tree<R>, start_time: Instant) {
        self.statistics.total_time = start_time.elapsed();
        self.statistics.tree_size = tree.len();
        self.statistics.max_depth = tree.max_depth();
        self.last_tree = Some(tree);
        self.phase = SearchPhase::Done;
        debug!("{}", self.statistics.summary());
    }

    /// Returns the lifecycle phase of the driver
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Returns the search statistics
    pub fn get_statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Returns the tree built by the last search
    pub fn last_tree(&self) -> Option<&Tree<R>> {
        self.last_tree.as_ref()
    }

    /// Returns a visualization of the last search tree, empty before the first search
    pub fn visualize_tree(&self) -> String {
        self.last_tree
            .as_ref()
            .map(|tree| tree.render())
            .unwrap_or_default()
    }
}
