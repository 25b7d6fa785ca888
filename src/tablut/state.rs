//! Tablut positions and moves.

use std::fmt;

use super::board::{Board, Square};
use crate::game::{Action, Position, Side};

/// Whose turn it is, or how the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    White,
    Black,
    WhiteWin,
    BlackWin,
    Draw,
}

impl Turn {
    /// Returns the side to move while the game is running
    pub fn side(self) -> Option<Side> {
        match self {
            Turn::White => Some(Side::White),
            Turn::Black => Some(Side::Black),
            Turn::WhiteWin | Turn::BlackWin | Turn::Draw => None,
        }
    }

    pub fn is_over(self) -> bool {
        self.side().is_none()
    }
}

impl From<Side> for Turn {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Turn::White,
            Side::Black => Turn::Black,
        }
    }
}

/// A full Tablut position: board, turn and the number of plies played
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TablutState {
    pub board: Board,
    pub turn: Turn,
    /// Plies played since the start of the game
    pub ply: u32,
}

impl TablutState {
    pub fn new(board: Board, turn: Turn) -> Self {
        TablutState {
            board,
            turn,
            ply: 0,
        }
    }

    /// The starting position, WHITE to move
    pub fn initial() -> Self {
        Self::new(Board::initial(), Turn::White)
    }
}

impl Default for TablutState {
    fn default() -> Self {
        Self::initial()
    }
}

impl Position for TablutState {
    fn side_to_move(&self) -> Option<Side> {
        self.turn.side()
    }
}

impl fmt::Display for TablutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        write!(f, "{:?} (ply {})", self.turn, self.ply)
    }
}

/// Moving one piece of `side` from `from` to `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TablutMove {
    pub from: Square,
    pub to: Square,
    pub side: Side,
}

impl TablutMove {
    pub fn new(from: Square, to: Square, side: Side) -> Self {
        TablutMove { from, to, side }
    }
}

impl Action for TablutMove {}

impl fmt::Display for TablutMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}
