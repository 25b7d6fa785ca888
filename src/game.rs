//! Interfaces of the collaborators the search consumes.
//!
//! The engine never knows the rules of the game it is playing. It asks a
//! [`MoveGenerator`] for geometrically plausible actions and a
//! [`PositionRules`] implementation to validate and apply them. Both are
//! supplied by the caller; [`crate::tablut`] ships a reference pair.

use std::fmt::{self, Debug};

use log::trace;

use crate::RuleViolation;

/// One of the two alternating players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// Returns the other player
    pub fn opponent(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "WHITE"),
            Side::Black => write!(f, "BLACK"),
        }
    }
}

/// Final result of a game or a playout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The given side won
    Win(Side),
    /// Neither side won
    Draw,
}

impl Outcome {
    /// Returns the winning side, if any
    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::Win(side) => Some(side),
            Outcome::Draw => None,
        }
    }
}

/// Trait for actions that label transitions between positions
pub trait Action: Clone + Debug + PartialEq + Send + Sync {}

/// Trait for immutable game positions held by search nodes
pub trait Position: Clone + Debug + Send + Sync {
    /// Returns the side to move, or `None` once the game has been decided
    fn side_to_move(&self) -> Option<Side>;
}

/// The rules engine: validates actions and detects the end of the game
pub trait PositionRules: Send + Sync {
    /// The position type these rules operate on
    type Position: Position;

    /// The action type these rules validate
    type Action: Action;

    /// Applies an action, returning the resulting position or the reason it was rejected
    ///
    /// Must be pure: the same illegal action on the same position always
    /// yields the same rejection.
    fn apply_move(
        &self,
        position: &Self::Position,
        action: &Self::Action,
    ) -> std::result::Result<Self::Position, RuleViolation>;

    /// Returns true if the game is over in this position
    fn is_terminal(&self, position: &Self::Position) -> bool;

    /// Returns the result of a finished game, or `None` while it is still running
    fn winner(&self, position: &Self::Position) -> Option<Outcome>;
}

/// Enumerates candidate actions before they are checked by the rules engine
pub trait MoveGenerator<R: PositionRules + ?Sized>: Send + Sync {
    /// Returns the plausible actions for `side` in `position`, in a stable order
    fn plausible_moves(&self, position: &R::Position, side: Side) -> Vec<R::Action>;
}

/// Generates every legal action for the side to move, paired with its resulting position
///
/// Candidates come from `generator` in its order; those rejected by `rules`
/// are dropped. Returns an empty list when the game is decided or the side
/// to move has nothing legal to play.
pub fn legal_transitions<R, G>(
    rules: &R,
    generator: &G,
    position: &R::Position,
) -> Vec<(R::Action, R::Position)>
where
    R: PositionRules + ?Sized,
    G: MoveGenerator<R> + ?Sized,
{
    let side = match position.side_to_move() {
        Some(side) => side,
        None => return Vec::new(),
    };

    generator
        .plausible_moves(position, side)
        .into_iter()
        .filter_map(|action| match rules.apply_move(position, &action) {
            Ok(next) => Some((action, next)),
            Err(violation) => {
                trace!("discarding {:?}: {}", action, violation);
                None
            }
        })
        .collect()
}
