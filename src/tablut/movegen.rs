//! Candidate move generation for Tablut.

use super::board::{Board, Square, DIRECTIONS};
use super::rules::AshtonRules;
use super::state::{TablutMove, TablutState};
use crate::game::{MoveGenerator, Side};

/// Generates straight-line slides for every piece of a side
///
/// Each piece slides up, down, left and right until the first occupied
/// square or the edge. Defenders also stop in front of camps, which they may
/// never enter. Everything else (the throne, attackers changing camp) is
/// left for the rules engine to reject.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlidingMoveGenerator;

impl SlidingMoveGenerator {
    /// Slides available to the piece on `from`
    pub fn slides(&self, board: &Board, from: Square, side: Side) -> Vec<TablutMove> {
        let mut moves = Vec::new();

        for &(dr, dc) in DIRECTIONS.iter() {
            let mut current = from.offset(dr, dc);
            while let Some(to) = current {
                if !board.is_empty(to) || (side == Side::White && to.is_camp()) {
                    break;
                }
                moves.push(TablutMove::new(from, to, side));
                current = to.offset(dr, dc);
            }
        }

        moves
    }
}

impl MoveGenerator<AshtonRules> for SlidingMoveGenerator {
    fn plausible_moves(&self, state: &TablutState, side: Side) -> Vec<TablutMove> {
        state
            .board
            .pieces()
            .filter(|(_, pawn)| match side {
                Side::White => pawn.is_white_side(),
                Side::Black => !pawn.is_white_side(),
            })
            .flat_map(|(square, _)| self.slides(&state.board, square, side))
            .collect()
    }
}
