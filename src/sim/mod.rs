//! Simulated play.
//!
//! Drives an engine with generated scores instead of a human table. Used
//! for reproducible whole-game tests and for exploring how often games
//! end within a given number of rounds.

pub mod runner;
pub mod source;

pub use runner::{
    simulate_batch, simulate_game, simulate_random_game, SimulationConfig, SimulationOutcome,
};
pub use source::{RandomScores, ScoreSource};
