#![allow(dead_code)]

use tablut_mcts::{Action, MoveGenerator, Outcome, Position, PositionRules, RuleViolation, Side};

// Simple Nim implementation for testing: players alternately take stones,
// whoever takes the last stone wins.
#[derive(Clone, Debug, PartialEq)]
pub struct Nim {
    pub stones: u32,
    pub to_move: Side,
    pub last_mover: Option<Side>,
}

impl Nim {
    pub fn new(stones: u32) -> Self {
        Nim {
            stones,
            to_move: Side::White,
            last_mover: None,
        }
    }
}

impl Position for Nim {
    fn side_to_move(&self) -> Option<Side> {
        if self.stones == 0 {
            None
        } else {
            Some(self.to_move)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Take(pub u32);

impl Action for Take {}

#[derive(Clone, Debug)]
pub struct NimRules;

impl PositionRules for NimRules {
    type Position = Nim;
    type Action = Take;

    fn apply_move(&self, position: &Nim, action: &Take) -> Result<Nim, RuleViolation> {
        if position.stones == 0 {
            return Err(RuleViolation::GameOver);
        }
        if action.0 == 0 {
            return Err(RuleViolation::NoMovement);
        }
        if action.0 > position.stones {
            return Err(RuleViolation::OutOfBoard);
        }

        Ok(Nim {
            stones: position.stones - action.0,
            to_move: position.to_move.opponent(),
            last_mover: Some(position.to_move),
        })
    }

    fn is_terminal(&self, position: &Nim) -> bool {
        position.stones == 0
    }

    fn winner(&self, position: &Nim) -> Option<Outcome> {
        if position.stones == 0 {
            position.last_mover.map(Outcome::Win)
        } else {
            None
        }
    }
}

/// Proposes a fixed list of takes, legal or not
#[derive(Clone, Debug)]
pub struct NimMoves {
    pub takes: Vec<u32>,
}

impl NimMoves {
    pub fn up_to(max_take: u32) -> Self {
        NimMoves {
            takes: (1..=max_take).collect(),
        }
    }
}

impl MoveGenerator<NimRules> for NimMoves {
    fn plausible_moves(&self, _position: &Nim, _side: Side) -> Vec<Take> {
        self.takes.iter().copied().map(Take).collect()
    }
}
