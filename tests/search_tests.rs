mod common;

use std::fmt::Debug;
use std::time::{Duration, Instant};

use common::{Nim, NimMoves, NimRules, Take};
use rand::{rngs::StdRng, RngCore, SeedableRng};
use tablut_mcts::{
    config::BestChildCriteria,
    policy::simulation::Playout,
    search::Tree,
    tablut::{AshtonRules, Board, SlidingMoveGenerator, Square, TablutMove, TablutState, Turn},
    BackpropagationPolicy, MCTSError, MonteCarloSearch, MoveGenerator, NodeId, Outcome, Position,
    PositionRules, SearchConfig, SearchNode, SearchPhase, SearchTree, SelectionPolicy, Side,
    SimulationPolicy,
};

// Always descends into the first child.
struct FirstChild;

impl<P: Position, A: Debug> SelectionPolicy<P, A> for FirstChild {
    fn select_child(&self, tree: &SearchTree<P, A>, node: NodeId) -> NodeId {
        tree.node(node).children()[0]
    }
}

// Scores every playout as an immediate draw.
struct AlwaysDraw;

impl<R: PositionRules> SimulationPolicy<R> for AlwaysDraw {
    fn simulate(
        &self,
        _position: &R::Position,
        _rules: &R,
        _generator: &dyn MoveGenerator<R>,
        _rng: &mut dyn RngCore,
    ) -> Playout {
        Playout {
            outcome: Outcome::Draw,
            plies: 0,
            capped: false,
        }
    }
}

// Counts visits and never credits a score.
struct VisitsOnly;

impl<P: Position, A: Debug> BackpropagationPolicy<P, A> for VisitsOnly {
    fn update_stats(&self, node: &mut SearchNode<P, A>, _outcome: Outcome, _mover: Side) {
        node.increment_visits();
    }
}

fn tablut_search(config: SearchConfig) -> MonteCarloSearch<AshtonRules, SlidingMoveGenerator> {
    MonteCarloSearch::new(AshtonRules::new(80), SlidingMoveGenerator, config)
}

fn state_from(rows: &str, turn: Turn) -> TablutState {
    TablutState::new(rows.parse::<Board>().unwrap(), turn)
}

fn square(name: &str) -> Square {
    name.parse().unwrap()
}

fn all_nodes<R: PositionRules>(tree: &Tree<R>) -> Vec<NodeId> {
    let mut nodes = Vec::new();
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        nodes.push(id);
        stack.extend_from_slice(tree.node(id).children());
    }
    nodes
}

// King on the throne, boxed in on three sides: only e5-f5 is legal.
const SINGLE_MOVE: &str = "
    OOOOOOOOO
    OOOOOOOOO
    OOOOOOOOO
    OOOOBOOOO
    OOOBKOBOO
    OOOOBOOOO
    OOOOOOOOO
    OOOOOOOOO
    OOOOOOOOO
";

// King on the throne with an attacker on every side.
const BOXED_KING: &str = "
    OOOOOOOOO
    OOOOOOOOO
    OOOOOOOOO
    OOOOBOOOO
    OOOBKBOOO
    OOOOBOOOO
    OOOOOOOOO
    OOOOOOOOO
    OOOOOOOOO
";

// King one step from an escape square.
const KING_NEAR_ESCAPE: &str = "
    OOOOOOOOO
    OOKOOOOOO
    OOOOOOOOO
    OOOOOOOOO
    OOOOTOOOO
    OOOOOOOOO
    OOOOOOOOO
    OOOOOOBOO
    OOOOOOOOO
";

#[test]
fn test_single_legal_action_is_returned() {
    let mut search = tablut_search(SearchConfig::default().with_max_iterations(1).with_seed(1));
    let state = state_from(SINGLE_MOVE, Turn::White);

    let action = search
        .choose_action(state, Duration::from_secs(10))
        .unwrap();

    assert_eq!(action, TablutMove::new(square("e5"), square("f5"), Side::White));
    assert_eq!(search.get_statistics().iterations, 1);
}

#[test]
fn test_single_legal_action_with_more_iterations() {
    let mut search = tablut_search(SearchConfig::default().with_max_iterations(20).with_seed(2));
    let state = state_from(SINGLE_MOVE, Turn::White);

    let action = search
        .choose_action(state, Duration::from_secs(10))
        .unwrap();

    assert_eq!(action.to_string(), "e5-f5");
    let tree = search.last_tree().unwrap();
    assert_eq!(tree.node(tree.root()).children().len(), 1);
}

#[test]
fn test_no_legal_action_is_an_error() {
    let mut search = tablut_search(SearchConfig::default().with_max_iterations(50).with_seed(3));
    let state = state_from(BOXED_KING, Turn::White);

    let result = search.choose_action(state, Duration::from_secs(10));

    assert_eq!(result, Err(MCTSError::NoLegalAction));
    // The side without a move notices after the first iteration.
    assert_eq!(search.get_statistics().iterations, 1);
    assert_eq!(search.phase(), SearchPhase::Done);
}

#[test]
fn test_decided_root_is_an_error() {
    let mut search = tablut_search(SearchConfig::default().with_max_iterations(10));
    let state = TablutState::new(Board::initial(), Turn::WhiteWin);

    let result = search.choose_action(state, Duration::from_secs(10));

    assert_eq!(result, Err(MCTSError::NoLegalAction));
    assert_eq!(search.get_statistics().iterations, 0);
}

#[test]
fn test_immediate_win_check_stops_early() {
    let config = SearchConfig::default()
        .with_max_iterations(1_000)
        .with_immediate_win_check(true)
        .with_seed(4);
    let mut search = tablut_search(config);
    let state = state_from(KING_NEAR_ESCAPE, Turn::White);

    let action = search
        .choose_action(state, Duration::from_secs(10))
        .unwrap();

    assert_eq!(action.to_string(), "c2-c1");
    assert_eq!(search.get_statistics().iterations, 1);
}

#[test]
fn test_finds_winning_take_in_nim() {
    let config = SearchConfig::default().with_max_iterations(500).with_seed(5);
    let mut search = MonteCarloSearch::new(NimRules, NimMoves::up_to(3), config);

    let action = search
        .choose_action(Nim::new(3), Duration::from_secs(30))
        .unwrap();

    assert_eq!(action, Take(3));
}

#[test]
fn test_every_criterion_finds_winning_take_in_nim() {
    for criteria in [
        BestChildCriteria::HighestScore,
        BestChildCriteria::MostVisits,
        BestChildCriteria::HighestMean,
    ] {
        let config = SearchConfig::default()
            .with_max_iterations(500)
            .with_best_child_criteria(criteria)
            .with_seed(6);
        let mut search = MonteCarloSearch::new(NimRules, NimMoves::up_to(3), config);

        let action = search
            .choose_action(Nim::new(3), Duration::from_secs(30))
            .unwrap();

        assert_eq!(action, Take(3), "criteria {:?}", criteria);
    }
}

#[test]
fn test_budget_bounds_the_search() {
    // Playouts end within 80 plies, which bounds the cost of one iteration.
    let config = SearchConfig::default()
        .with_max_playout_plies(100)
        .with_seed(7);
    let mut search = tablut_search(config);
    let budget = Duration::from_millis(200);

    let start = Instant::now();
    let result = search.choose_action(TablutState::initial(), budget);
    let elapsed = start.elapsed();

    assert!(result.is_ok());
    let stats = search.get_statistics();
    assert!(stats.budget_exhausted);
    assert!(stats.iterations >= 1);
    // Only the last iteration may run past the budget.
    assert!(elapsed < budget + Duration::from_secs(1), "took {:?}", elapsed);
}

#[test]
fn test_root_visits_match_iterations_and_parents_dominate_children() {
    let mut search = tablut_search(SearchConfig::default().with_max_iterations(150).with_seed(8));
    search
        .choose_action(TablutState::initial(), Duration::from_secs(60))
        .unwrap();

    let stats = search.get_statistics().clone();
    let tree = search.last_tree().unwrap();
    let root = tree.root();

    assert_eq!(tree.node(root).visits(), stats.iterations as u64);
    assert_eq!(stats.playouts, stats.iterations);
    assert_eq!(stats.tree_size, tree.len());

    for id in all_nodes::<AshtonRules>(tree) {
        let node = tree.node(id);
        let child_visits: u64 = node.children().iter().map(|&c| tree.node(c).visits()).sum();
        assert!(node.visits() >= child_visits, "node {} has fewer visits than its children", id);
        for &child in node.children() {
            assert!(tree.node(child).visits() <= node.visits());
        }
    }
}

#[test]
fn test_children_hold_the_positions_their_actions_produce() {
    let rules = AshtonRules::new(80);
    let mut search = tablut_search(SearchConfig::default().with_max_iterations(60).with_seed(9));
    search
        .choose_action(TablutState::initial(), Duration::from_secs(60))
        .unwrap();

    let tree = search.last_tree().unwrap();
    for id in all_nodes::<AshtonRules>(tree) {
        let node = tree.node(id);
        for &child in node.children() {
            let child = tree.node(child);
            let expected = rules
                .apply_move(node.position(), child.action().unwrap())
                .unwrap();
            assert_eq!(child.position(), &expected);
            assert_eq!(child.mover(), node.position().turn.side());
        }
    }
}

#[test]
fn test_same_seed_same_search() {
    let run = || {
        let mut search =
            tablut_search(SearchConfig::default().with_max_iterations(40).with_seed(10));
        let action = search
            .choose_action(TablutState::initial(), Duration::from_secs(60))
            .unwrap();
        (action, search.visualize_tree())
    };

    let (first_action, first_tree) = run();
    let (second_action, second_tree) = run();

    assert_eq!(first_action, second_action);
    assert_eq!(first_tree, second_tree);
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let config = SearchConfig::default().with_exploration_constant(f64::NAN);
    let mut search = tablut_search(config);

    let result = search.choose_action(TablutState::initial(), Duration::from_secs(1));

    assert!(matches!(result, Err(MCTSError::InvalidConfiguration(_))));
    assert_eq!(search.phase(), SearchPhase::Idle);
}

#[test]
fn test_phase_moves_from_idle_to_done() {
    let mut search = tablut_search(SearchConfig::default().with_max_iterations(5).with_seed(11));
    assert_eq!(search.phase(), SearchPhase::Idle);
    assert!(search.visualize_tree().is_empty());

    search
        .choose_action(TablutState::initial(), Duration::from_secs(10))
        .unwrap();

    assert_eq!(search.phase(), SearchPhase::Done);
    assert!(search.visualize_tree().starts_with("Root"));
}

#[test]
fn test_each_search_starts_from_a_fresh_tree() {
    let mut search = tablut_search(SearchConfig::default().with_max_iterations(10).with_seed(12));

    search
        .choose_action(TablutState::initial(), Duration::from_secs(10))
        .unwrap();
    search
        .choose_action(TablutState::initial(), Duration::from_secs(10))
        .unwrap();

    let tree = search.last_tree().unwrap();
    assert_eq!(tree.node(tree.root()).visits(), 10);
    assert_eq!(search.get_statistics().iterations, 10);
}

#[test]
fn test_search_uses_the_configured_default_budget() {
    let config = SearchConfig::default()
        .with_max_time(Duration::from_millis(50))
        .with_seed(13);
    let mut search = tablut_search(config);

    assert!(search.search(TablutState::initial()).is_ok());
    assert!(search.get_statistics().budget_exhausted);
}

#[test]
fn test_custom_selection_policy_drives_the_descent() {
    let config = SearchConfig::default().with_max_iterations(10).with_seed(14);
    let mut search =
        MonteCarloSearch::new(NimRules, NimMoves::up_to(3), config).with_selection_policy(FirstChild);

    assert!(search.choose_action(Nim::new(3), Duration::from_secs(10)).is_ok());

    let tree = search.last_tree().unwrap();
    let root_children = tree.node(tree.root()).children();
    assert!(tree.node(root_children[0]).is_expanded());
    // UCT would have tried the second child by now; the first-child policy never does.
    assert!(!tree.node(root_children[1]).is_expanded());
    assert_eq!(tree.node(tree.root()).visits(), 10);
}

#[test]
fn test_custom_simulation_policy_feeds_backpropagation() {
    let config = SearchConfig::default().with_max_iterations(25).with_seed(15);
    let mut search = tablut_search(config).with_simulation_policy(AlwaysDraw);

    search
        .choose_action(TablutState::initial(), Duration::from_secs(10))
        .unwrap();

    assert_eq!(search.get_statistics().total_playout_plies, 0);
    let tree = search.last_tree().unwrap();
    for id in all_nodes::<AshtonRules>(tree) {
        let node = tree.node(id);
        // Every playout is a draw worth 1.
        assert_eq!(node.score(), node.visits() as f64);
    }
}

#[test]
fn test_custom_backpropagation_policy_updates_the_tree() {
    let config = SearchConfig::default().with_max_iterations(50).with_seed(16);
    let mut search = MonteCarloSearch::new(NimRules, NimMoves::up_to(3), config)
        .with_backpropagation_policy(VisitsOnly);

    let action = search
        .choose_action(Nim::new(3), Duration::from_secs(10))
        .unwrap();

    // No node earns a score, so the first child wins the tie.
    assert_eq!(action, Take(1));
    let tree = search.last_tree().unwrap();
    assert_eq!(tree.node(tree.root()).visits(), 50);
    assert_eq!(tree.node(tree.root()).score(), 0.0);
}

#[test]
fn test_injected_rng_makes_searches_reproducible() {
    let run = |config: SearchConfig| {
        let mut search = tablut_search(config.with_max_iterations(30))
            .with_rng(StdRng::seed_from_u64(21));
        let action = search
            .choose_action(TablutState::initial(), Duration::from_secs(60))
            .unwrap();
        (action, search.visualize_tree())
    };

    let first = run(SearchConfig::default());
    let second = run(SearchConfig::default());
    // The injected source replaces the one seeded from the config.
    let overridden = run(SearchConfig::default().with_seed(99));

    assert_eq!(first, second);
    assert_eq!(first, overridden);
}
