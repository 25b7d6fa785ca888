//! Configuration options for the search
//!
//! This module defines the parameters that control the behavior of a
//! [`MonteCarloSearch`](crate::MonteCarloSearch). Every driver owns its own
//! copy, so independent searches never share tuning state.

use std::time::Duration;

use crate::{MCTSError, Result};

/// Criteria for selecting the action to play once the budget is spent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestChildCriteria {
    /// Select the root child with the highest accumulated score
    ///
    /// This is the reference behavior. Raw score grows with visits, so it
    /// can favor a heavily visited but mediocre child over a lightly
    /// visited strong one.
    HighestScore,

    /// Select the root child with the most visits
    ///
    /// The usual robust-child rule of MCTS implementations.
    MostVisits,

    /// Select the root child with the highest mean score
    HighestMean,
}

/// Configuration for the search
///
/// Use the builder methods to create a customized configuration.
///
/// # Example
///
/// ```
/// use tablut_mcts::{SearchConfig, config::BestChildCriteria};
/// use std::time::Duration;
///
/// let config = SearchConfig::default()
///     .with_exploration_constant(1.5)
///     .with_max_time(Duration::from_secs(5))
///     .with_best_child_criteria(BestChildCriteria::MostVisits)
///     .with_seed(42);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Exploration constant `C` of the UCT formula
    pub exploration_constant: f64,

    /// Credit added to a node when the side that moved into it wins a playout
    pub win_score: f64,

    /// Credit added to every node on the path when a playout is drawn
    pub draw_score: f64,

    /// Wall-clock budget used by [`MonteCarloSearch::search`](crate::MonteCarloSearch::search)
    pub max_time: Duration,

    /// Optional cap on the number of iterations
    ///
    /// The search stops at whichever of the time budget or this cap comes first.
    /// At least one iteration always runs.
    pub max_iterations: Option<usize>,

    /// Safety cap on the length of a random playout
    pub max_playout_plies: usize,

    /// How the final action is picked from the root's children
    pub best_child_criteria: BestChildCriteria,

    /// Stop as soon as a root action wins on the spot
    pub immediate_win_check: bool,

    /// Seed for the search's random source; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            exploration_constant: 1.41,
            win_score: 3.0,
            draw_score: 1.0,
            max_time: Duration::from_secs(30),
            max_iterations: None,
            max_playout_plies: 1_000,
            best_child_criteria: BestChildCriteria::HighestScore,
            immediate_win_check: false,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Sets the exploration constant
    pub fn with_exploration_constant(mut self, constant: f64) -> Self {
        self.exploration_constant = constant;
        self
    }

    /// Sets the win and draw credits
    pub fn with_scores(mut self, win_score: f64, draw_score: f64) -> Self {
        self.win_score = win_score;
        self.draw_score = draw_score;
        self
    }

    /// Sets the default time budget
    pub fn with_max_time(mut self, duration: Duration) -> Self {
        self.max_time = duration;
        self
    }

    /// Sets the maximum number of iterations
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    /// Sets the playout safety cap
    pub fn with_max_playout_plies(mut self, plies: usize) -> Self {
        self.max_playout_plies = plies;
        self
    }

    /// Sets the criteria for selecting the best child
    pub fn with_best_child_criteria(mut self, criteria: BestChildCriteria) -> Self {
        self.best_child_criteria = criteria;
        self
    }

    /// Enables or disables the immediate win check
    pub fn with_immediate_win_check(mut self, enabled: bool) -> Self {
        self.immediate_win_check = enabled;
        self
    }

    /// Seeds the random source, making searches reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that the parameters describe a search that can run
    pub fn validate(&self) -> Result<()> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(MCTSError::InvalidConfiguration(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        if !(self.win_score.is_finite() && self.win_score >= 0.0)
            || !(self.draw_score.is_finite() && self.draw_score >= 0.0)
        {
            return Err(MCTSError::InvalidConfiguration(format!(
                "scores must be finite and non-negative, got win {} draw {}",
                self.win_score, self.draw_score
            )));
        }
        if self.max_playout_plies == 0 {
            return Err(MCTSError::InvalidConfiguration(
                "playout cap must allow at least one ply".to_string(),
            ));
        }
        if self.max_iterations == Some(0) {
            return Err(MCTSError::InvalidConfiguration(
                "iteration cap must allow at least one iteration".to_string(),
            ));
        }
        Ok(())
    }
}
