//! Ashton Tablut, as a rules engine and move generator for the search
//!
//! Tablut is played on a 9x9 board. WHITE defends a king that starts on the
//! central throne and wins when the king reaches one of the escape squares on
//! the edge. BLACK starts with sixteen attackers in four camps and wins by
//! capturing the king. Every piece moves like a rook.
//!
//! ```
//! use tablut_mcts::tablut::{AshtonRules, SlidingMoveGenerator, TablutState};
//! use tablut_mcts::game::legal_transitions;
//!
//! let state = TablutState::initial();
//! let moves = legal_transitions(&AshtonRules::default(), &SlidingMoveGenerator, &state);
//! assert!(!moves.is_empty());
//! ```

pub mod board;
pub mod movegen;
pub mod rules;
pub mod state;

pub use board::{Board, Pawn, Square};
pub use movegen::SlidingMoveGenerator;
pub use rules::AshtonRules;
pub use state::{TablutMove, TablutState, Turn};

/// Errors raised while parsing squares or boards
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TablutParseError {
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("invalid board: {0}")]
    InvalidBoard(String),
}
