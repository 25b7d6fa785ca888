//! Simulation policies for the MCTS algorithm
//!
//! Simulation policies play a game out from a position to produce the
//! win/loss/draw signal that backpropagation folds into the tree.

use log::warn;
use rand::{Rng, RngCore};

use crate::game::{legal_transitions, MoveGenerator, Outcome, Position, PositionRules};

/// Result of one playout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playout {
    /// How the simulated game ended
    pub outcome: Outcome,

    /// Number of plies played before the game ended
    pub plies: usize,

    /// True if the safety cap stopped the playout and the outcome is a forced draw
    pub capped: bool,
}

/// Trait for policies that simulate games
pub trait SimulationPolicy<R: PositionRules>: Send + Sync {
    /// Plays the game out from `position` and reports how it ended
    ///
    /// Works on its own copy of the position; the caller's data is never touched.
    fn simulate(
        &self,
        position: &R::Position,
        rules: &R,
        generator: &dyn MoveGenerator<R>,
        rng: &mut dyn RngCore,
    ) -> Playout;
}

/// Uniform random playout
///
/// At every ply one legal action of the side to move is drawn uniformly.
/// A side left without a legal action loses. If the game has not ended
/// after `max_plies` plies the playout is reported as a draw.
#[derive(Debug, Clone)]
pub struct RandomPlayout {
    /// Safety cap on the playout length
    pub max_plies: usize,
}

impl RandomPlayout {
    /// Creates a new random playout policy with the given ply cap
    pub fn new(max_plies: usize) -> Self {
        RandomPlayout { max_plies }
    }
}

impl Default for RandomPlayout {
    fn default() -> Self {
        Self::new(1_000)
    }
}

impl<R: PositionRules> SimulationPolicy<R> for RandomPlayout {
    fn simulate(
        &self,
        position: &R::Position,
        rules: &R,
        generator: &dyn MoveGenerator<R>,
        rng: &mut dyn RngCore,
    ) -> Playout {
        let mut current = position.clone();

        for plies in 0..=self.max_plies {
            if rules.is_terminal(&current) {
                return Playout {
                    outcome: rules.winner(&current).unwrap_or(Outcome::Draw),
                    plies,
                    capped: false,
                };
            }

            let side = match current.side_to_move() {
                Some(side) => side,
                None => {
                    return Playout {
                        outcome: rules.winner(&current).unwrap_or(Outcome::Draw),
                        plies,
                        capped: false,
                    }
                }
            };

            if plies == self.max_plies {
                break;
            }

            let mut moves = legal_transitions(rules, generator, &current);
            if moves.is_empty() {
                // No move available loses the game.
                return Playout {
                    outcome: Outcome::Win(side.opponent()),
                    plies,
                    capped: false,
                };
            }

            let pick = rng.gen_range(0..moves.len());
            current = moves.swap_remove(pick).1;
        }

        warn!(
            "playout reached the cap of {} plies without a result, scoring it as a draw",
            self.max_plies
        );
        Playout {
            outcome: Outcome::Draw,
            plies: self.max_plies,
            capped: true,
        }
    }
}

// Implement SimulationPolicy for Box<dyn SimulationPolicy>
impl<R: PositionRules> SimulationPolicy<R> for Box<dyn SimulationPolicy<R>> {
    fn simulate(
        &self,
        position: &R::Position,
        rules: &R,
        generator: &dyn MoveGenerator<R>,
        rng: &mut dyn RngCore,
    ) -> Playout {
        (**self).simulate(position, rules, generator, rng)
    }
}
