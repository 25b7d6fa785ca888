//! Policies for the phases of the MCTS algorithm
//!
//! - Selection policies: how to choose which child to descend into
//! - Expansion: how a leaf grows one child per legal action
//! - Simulation policies: how to play out games from a node
//! - Backpropagation policies: how to update node statistics

pub mod backpropagation;
pub mod expansion;
pub mod selection;
pub mod simulation;

pub use backpropagation::{BackpropagationPolicy, WinCreditPolicy};
pub use expansion::expand;
pub use selection::{SelectionPolicy, UctPolicy};
pub use simulation::{Playout, RandomPlayout, SimulationPolicy};
