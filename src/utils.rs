//! Arithmetic helpers for the UCT formula
//!
//! Kept free of tree types so the formula can be checked in isolation.

/// Calculates the exploitation term: the mean credit per visit
///
/// Returns 0.0 if no visits have occurred.
pub fn mean_score(score: f64, visits: u64) -> f64 {
    if visits == 0 {
        return 0.0;
    }
    score / visits as f64
}

/// Calculates the exploration term `C * sqrt(ln(parent_visits) / child_visits)`
pub fn exploration_term(parent_visits: u64, child_visits: u64, exploration_constant: f64) -> f64 {
    if child_visits == 0 {
        return f64::INFINITY;
    }

    exploration_constant * ((parent_visits as f64).ln() / child_visits as f64).sqrt()
}

/// Calculates the UCT value of a child
///
/// An unvisited child scores positive infinity so every child is tried once
/// before exploitation starts.
pub fn uct_value(score: f64, visits: u64, parent_visits: u64, exploration_constant: f64) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }

    mean_score(score, visits) + exploration_term(parent_visits, visits, exploration_constant)
}
