//! Ashton Tablut rules: move validation, captures and game end.

use super::board::{Board, Pawn, Square, DIRECTIONS, THRONE};
use super::state::{TablutMove, TablutState, Turn};
use crate::game::{Outcome, PositionRules, Side};
use crate::RuleViolation;

/// Rules engine for Ashton Tablut
///
/// A game that reaches `max_plies` plies without a winner is a draw, which
/// bounds the length of every game played under these rules.
#[derive(Debug, Clone)]
pub struct AshtonRules {
    pub max_plies: u32,
}

impl AshtonRules {
    pub fn new(max_plies: u32) -> Self {
        AshtonRules { max_plies }
    }

    /// Checks an action without applying it
    ///
    /// Checks run in a fixed order, so the same illegal action always fails
    /// with the same reason.
    pub fn validate(&self, state: &TablutState, action: &TablutMove) -> Result<(), RuleViolation> {
        let side = state.turn.side().ok_or(RuleViolation::GameOver)?;
        let (from, to) = (action.from, action.to);

        if !from.is_on_board() || !to.is_on_board() {
            return Err(RuleViolation::OutOfBoard);
        }
        if from == to {
            return Err(RuleViolation::NoMovement);
        }

        let piece = state.board.get(from);
        if action.side != side || !belongs_to(piece, side) {
            return Err(RuleViolation::WrongPiece);
        }
        if !state.board.is_empty(to) {
            return Err(RuleViolation::OccupiedDestination);
        }
        if from.row != to.row && from.col != to.col {
            return Err(RuleViolation::Diagonal);
        }
        if to.is_throne() {
            return Err(RuleViolation::Throne);
        }
        if to.is_camp() && !may_stand_in_camp(piece, from, to) {
            return Err(RuleViolation::Citadel);
        }

        for square in path_between(from, to) {
            if square.is_throne() {
                return Err(RuleViolation::Throne);
            }
            if square.is_camp() && !may_stand_in_camp(piece, from, square) {
                return Err(RuleViolation::ClimbingCitadel);
            }
            if !state.board.is_empty(square) {
                return Err(RuleViolation::Climbing);
            }
        }

        Ok(())
    }
}

impl Default for AshtonRules {
    fn default() -> Self {
        Self::new(300)
    }
}

impl PositionRules for AshtonRules {
    type Position = TablutState;
    type Action = TablutMove;

    fn apply_move(
        &self,
        state: &TablutState,
        action: &TablutMove,
    ) -> Result<TablutState, RuleViolation> {
        self.validate(state, action)?;

        let mut board = state.board;
        let piece = board.get(action.from);
        board.set(action.from, Pawn::Empty);
        board.set(action.to, piece);

        let king_captured = resolve_captures(&mut board, action.to, action.side);
        let ply = state.ply + 1;

        let turn = if king_captured {
            Turn::BlackWin
        } else if piece == Pawn::King && action.to.is_escape() {
            Turn::WhiteWin
        } else if ply >= self.max_plies {
            Turn::Draw
        } else {
            Turn::from(action.side.opponent())
        };

        Ok(TablutState { board, turn, ply })
    }

    fn is_terminal(&self, state: &TablutState) -> bool {
        state.turn.is_over()
    }

    fn winner(&self, state: &TablutState) -> Option<Outcome> {
        match state.turn {
            Turn::WhiteWin => Some(Outcome::Win(Side::White)),
            Turn::BlackWin => Some(Outcome::Win(Side::Black)),
            Turn::Draw => Some(Outcome::Draw),
            Turn::White | Turn::Black => None,
        }
    }
}

fn belongs_to(piece: Pawn, side: Side) -> bool {
    match side {
        Side::White => piece.is_white_side(),
        Side::Black => piece == Pawn::Black,
    }
}

/// Attackers may move inside the camp they stand in; nobody else enters a camp.
fn may_stand_in_camp(piece: Pawn, from: Square, square: Square) -> bool {
    piece == Pawn::Black && from.camp().is_some() && from.camp() == square.camp()
}

/// Squares strictly between two squares on the same line
fn path_between(from: Square, to: Square) -> Vec<Square> {
    let dr = (to.row as isize - from.row as isize).signum();
    let dc = (to.col as isize - from.col as isize).signum();

    let mut path = Vec::new();
    let mut current = from.offset(dr, dc);
    while let Some(square) = current {
        if square == to {
            break;
        }
        path.push(square);
        current = square.offset(dr, dc);
    }
    path
}

/// A square that helps capture a black soldier
fn hostile_to_black(board: &Board, square: Square) -> bool {
    board.get(square).is_white_side()
        || ((square.is_camp() || square.is_throne()) && board.is_empty(square))
}

/// A square that helps capture a white soldier
fn hostile_to_white(board: &Board, square: Square) -> bool {
    board.get(square) == Pawn::Black
        || square.is_camp()
        || (square.is_throne() && board.is_empty(square))
}

fn king_is_captured(board: &Board, king: Square, beyond: Option<Square>) -> bool {
    let attacked = |square: Option<Square>| square.is_some_and(|s| board.get(s) == Pawn::Black);

    if king.is_throne() || king.is_next_to_throne() {
        // Surrounded on every side except the throne itself.
        DIRECTIONS
            .iter()
            .map(|&(dr, dc)| king.offset(dr, dc))
            .filter(|square| *square != Some(THRONE))
            .all(attacked)
    } else {
        beyond.is_some_and(|s| board.get(s) == Pawn::Black || s.is_camp())
    }
}

/// Removes the pieces captured by the piece that just landed on `to`
///
/// Returns true if the king was captured.
fn resolve_captures(board: &mut Board, to: Square, mover: Side) -> bool {
    let mut king_captured = false;

    for &(dr, dc) in DIRECTIONS.iter() {
        let neighbour = match to.offset(dr, dc) {
            Some(square) => square,
            None => continue,
        };
        let beyond = neighbour.offset(dr, dc);

        match (mover, board.get(neighbour)) {
            (Side::White, Pawn::Black) => {
                // Attackers sheltering in a camp cannot be taken.
                if !neighbour.is_camp() && beyond.is_some_and(|s| hostile_to_black(board, s)) {
                    board.set(neighbour, Pawn::Empty);
                }
            }
            (Side::Black, Pawn::White) => {
                if beyond.is_some_and(|s| hostile_to_white(board, s)) {
                    board.set(neighbour, Pawn::Empty);
                }
            }
            (Side::Black, Pawn::King) => {
                if king_is_captured(board, neighbour, beyond) {
                    board.set(neighbour, Pawn::Empty);
                    king_captured = true;
                }
            }
            _ => {}
        }
    }

    king_captured
}
