//! Tablut self-play example
//!
//! Two searches play a full game of Ashton Tablut against each other.
//!
//! ```text
//! cargo run --example self_play -- [budget_ms] [max_plies]
//! ```
//!
//! Set `RUST_LOG=info` (or `debug`) to see what each search is doing.

use std::env;
use std::time::Duration;

use tablut_mcts::{
    tablut::{AshtonRules, SlidingMoveGenerator, TablutState},
    MCTSError, MonteCarloSearch, PositionRules, SearchConfig, Side,
};

fn main() {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let budget_ms: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(500);
    let max_plies: u32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(120);
    let budget = Duration::from_millis(budget_ms);

    println!("MCTS Tablut Self-Play Example");
    println!("=============================");
    println!("Budget per move: {} ms, draw after {} plies", budget_ms, max_plies);
    println!();

    let config = SearchConfig::default().with_immediate_win_check(true);
    let mut white = MonteCarloSearch::new(
        AshtonRules::new(max_plies),
        SlidingMoveGenerator,
        config.clone(),
    );
    let mut black = MonteCarloSearch::new(AshtonRules::new(max_plies), SlidingMoveGenerator, config);

    let rules = AshtonRules::new(max_plies);
    let mut state = TablutState::initial();

    while let Some(side) = state.turn.side() {
        let search = match side {
            Side::White => &mut white,
            Side::Black => &mut black,
        };

        let action = match search.choose_action(state.clone(), budget) {
            Ok(action) => action,
            Err(MCTSError::NoLegalAction) => {
                println!("{} cannot move and loses.", side);
                println!("{} wins!", side.opponent());
                return;
            }
            Err(err) => {
                eprintln!("search failed: {}", err);
                return;
            }
        };

        let stats = search.get_statistics();
        println!(
            "ply {:>3}: {} plays {} ({} iterations, {} nodes)",
            state.ply + 1,
            side,
            action,
            stats.iterations,
            stats.tree_size
        );

        state = match rules.apply_move(&state, &action) {
            Ok(next) => next,
            Err(violation) => {
                eprintln!("search returned an illegal move {}: {}", action, violation);
                return;
            }
        };
    }

    println!();
    println!("{}", state);
    match rules.winner(&state) {
        Some(outcome) => match outcome.winner() {
            Some(side) => println!("{} wins!", side),
            None => println!("It's a draw!"),
        },
        None => println!("Game stopped without a result."),
    }
}
