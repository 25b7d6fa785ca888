mod common;

use common::{Nim, NimMoves, NimRules};
use rand::{rngs::StdRng, SeedableRng};
use tablut_mcts::{
    policy::simulation::{RandomPlayout, SimulationPolicy},
    tablut::{AshtonRules, SlidingMoveGenerator, TablutState},
    Action, MoveGenerator, Outcome, Position, PositionRules, RuleViolation, Side,
};

// A game that never ends: both sides step forever.
#[derive(Clone, Debug, PartialEq)]
struct Treadmill {
    to_move: Side,
}

impl Position for Treadmill {
    fn side_to_move(&self) -> Option<Side> {
        Some(self.to_move)
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Step;

impl Action for Step {}

struct TreadmillRules;

impl PositionRules for TreadmillRules {
    type Position = Treadmill;
    type Action = Step;

    fn apply_move(&self, position: &Treadmill, _action: &Step) -> Result<Treadmill, RuleViolation> {
        Ok(Treadmill {
            to_move: position.to_move.opponent(),
        })
    }

    fn is_terminal(&self, _position: &Treadmill) -> bool {
        false
    }

    fn winner(&self, _position: &Treadmill) -> Option<Outcome> {
        None
    }
}

struct Steps;

impl MoveGenerator<TreadmillRules> for Steps {
    fn plausible_moves(&self, _position: &Treadmill, _side: Side) -> Vec<Step> {
        vec![Step]
    }
}

#[test]
fn test_terminal_position_returns_its_result() {
    let position = Nim {
        stones: 0,
        to_move: Side::White,
        last_mover: Some(Side::Black),
    };
    let mut rng = StdRng::seed_from_u64(1);

    let playout =
        RandomPlayout::default().simulate(&position, &NimRules, &NimMoves::up_to(3), &mut rng);

    assert_eq!(playout.outcome, Outcome::Win(Side::Black));
    assert_eq!(playout.plies, 0);
    assert!(!playout.capped);
}

#[test]
fn test_side_without_legal_action_loses() {
    // Only "take 5" is ever proposed, which is illegal with 2 stones left.
    let position = Nim::new(2);
    let moves = NimMoves { takes: vec![5] };
    let mut rng = StdRng::seed_from_u64(1);

    let playout = RandomPlayout::default().simulate(&position, &NimRules, &moves, &mut rng);

    assert_eq!(playout.outcome, Outcome::Win(Side::Black));
    assert_eq!(playout.plies, 0);
}

#[test]
fn test_forced_line_is_played_to_the_end() {
    // Taking one stone at a time from three: WHITE takes the last one.
    let position = Nim::new(3);
    let mut rng = StdRng::seed_from_u64(99);

    let playout =
        RandomPlayout::default().simulate(&position, &NimRules, &NimMoves::up_to(1), &mut rng);

    assert_eq!(playout.outcome, Outcome::Win(Side::White));
    assert_eq!(playout.plies, 3);
    assert!(!playout.capped);
}

#[test]
fn test_endless_game_is_capped_as_a_draw() {
    let position = Treadmill {
        to_move: Side::White,
    };
    let mut rng = StdRng::seed_from_u64(5);

    let playout = RandomPlayout::new(10).simulate(&position, &TreadmillRules, &Steps, &mut rng);

    assert_eq!(playout.outcome, Outcome::Draw);
    assert_eq!(playout.plies, 10);
    assert!(playout.capped);
}

#[test]
fn test_playout_leaves_the_input_position_untouched() {
    let state = TablutState::initial();
    let before = state.clone();
    let mut rng = StdRng::seed_from_u64(3);

    RandomPlayout::default().simulate(&state, &AshtonRules::new(40), &SlidingMoveGenerator, &mut rng);

    assert_eq!(state, before);
}

#[test]
fn test_tablut_playout_ends_within_the_ply_limit() {
    let rules = AshtonRules::new(40);
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..5 {
        let playout = RandomPlayout::default().simulate(
            &TablutState::initial(),
            &rules,
            &SlidingMoveGenerator,
            &mut rng,
        );
        assert!(playout.plies <= 40, "played {} plies", playout.plies);
        assert!(!playout.capped);
    }
}

#[test]
fn test_same_seed_same_playout() {
    let rules = AshtonRules::new(60);
    let policy = RandomPlayout::default();

    let run = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        policy.simulate(&TablutState::initial(), &rules, &SlidingMoveGenerator, &mut rng)
    };

    assert_eq!(run(42), run(42));
}
