//! # tablut-mcts
//!
//! A time-bounded Monte Carlo Tree Search (MCTS) move selector for two-player,
//! perfect-information, alternating-turn board games.
//!
//! Given a position and a thinking budget, the search grows a game tree with
//! the UCT selection rule, finishes games with uniform random playouts, and
//! returns the single action it recommends. The game itself stays outside the
//! engine: a [`PositionRules`] implementation validates and applies actions,
//! and a [`MoveGenerator`] proposes candidates. The [`tablut`] module ships a
//! complete pair for Ashton Tablut.
//!
//! ## Basic Usage
//!
//! ```
//! use std::time::Duration;
//!
//! use tablut_mcts::{
//!     tablut::{AshtonRules, SlidingMoveGenerator, TablutState},
//!     MonteCarloSearch, SearchConfig,
//! };
//!
//! fn main() -> Result<(), tablut_mcts::MCTSError> {
//!     // Keep the doctest quick: a handful of iterations, fixed seed.
//!     let config = SearchConfig::default()
//!         .with_max_iterations(8)
//!         .with_seed(7);
//!
//!     let mut search = MonteCarloSearch::new(AshtonRules::default(), SlidingMoveGenerator, config);
//!
//!     let action = search.choose_action(TablutState::initial(), Duration::from_secs(5))?;
//!     println!("Best action: {}", action);
//!     println!("{}", search.get_statistics().summary());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## How It Works
//!
//! Each iteration runs four phases to completion:
//!
//! 1. **Selection**: starting from the root, follow the child with the best
//!    UCT value until reaching a node that has no children yet.
//!
//! 2. **Expansion**: if that node's game is still running, add one child per
//!    legal action. Candidates come from the move generator and are filtered
//!    by the rules engine.
//!
//! 3. **Simulation**: from a random new child, play uniformly random legal
//!    moves until the game ends. A side with no legal move loses.
//!
//! 4. **Backpropagation**: walk back to the root, adding a visit to every
//!    node and crediting the nodes whose mover won.
//!
//! When the budget runs out the root child with the highest accumulated
//! score is played (see [`config::BestChildCriteria`] for the alternatives).

pub mod config;
pub mod game;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tablut;
pub mod tree;
pub mod utils;

pub use config::SearchConfig;
pub use game::{Action, MoveGenerator, Outcome, Position, PositionRules, Side};
pub use policy::{BackpropagationPolicy, SelectionPolicy, SimulationPolicy};
pub use search::{MonteCarloSearch, SearchPhase};
pub use stats::SearchStatistics;
pub use tree::{NodeId, SearchNode, SearchTree};

/// Error types for the search
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MCTSError {
    /// The side to move has no legal action, or the game is already decided
    #[error("No legal action available from current position")]
    NoLegalAction,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for search operations
pub type Result<T> = std::result::Result<T, MCTSError>;

/// Reasons a rules engine rejects an action
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleViolation {
    /// A square of the action lies outside the board
    #[error("square outside the board")]
    OutOfBoard,

    /// Origin and destination are the same square
    #[error("the piece does not move")]
    NoMovement,

    /// The game has already ended
    #[error("the game is over")]
    GameOver,

    /// The origin does not hold a piece of the side to move
    #[error("no piece of the side to move on the origin square")]
    WrongPiece,

    /// The destination is not empty
    #[error("destination is occupied")]
    OccupiedDestination,

    /// Origin and destination share neither a row nor a column
    #[error("diagonal moves are not allowed")]
    Diagonal,

    /// The move ends on or crosses the throne
    #[error("the throne cannot be entered or crossed")]
    Throne,

    /// The move ends on a camp the piece may not enter
    #[error("the piece may not enter this camp")]
    Citadel,

    /// The move crosses a camp the piece may not enter
    #[error("the piece may not climb over a camp")]
    ClimbingCitadel,

    /// The move passes over another piece
    #[error("the piece may not climb over another piece")]
    Climbing,
}
