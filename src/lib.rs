//! # ninety-nine
//!
//! Score keeping for "99"-style explosion card games.
//!
//! Players add their round scores to a running total. A total above the
//! threshold (99 by default) explodes: the first time, the player escapes
//! back in at the highest total still under the threshold; the second time,
//! they are out. The last player standing wins.
//!
//! ## Design Principles
//!
//! 1. **Snapshots, not shared mutation**: settlement takes a `&Roster` and
//!    returns a new `Roster`. The input is never observed half-updated.
//!
//! 2. **Explicit rule order**: the all-but-one sweep is checked before
//!    ordinary explosions; win detection runs last.
//!
//! 3. **No I/O in the core**: the presentation layer owns the current
//!    snapshot and the text its players type.
//!
//! ## Modules
//!
//! - `core`: Player ids and records, roster, configuration, RNG
//! - `rules`: Round validation, settlement and the `RoundEngine` trait
//! - `session`: Current snapshot plus the round being entered
//! - `sim`: Simulated play against generated scores
//! - `errors`: Error types

pub mod core;
pub mod errors;
pub mod rules;
pub mod session;
pub mod sim;

// Re-export commonly used types
pub use crate::core::{
    GameConfig, GameRng, Player, PlayerId, PlayerSpec, RoundEntry, Roster, RulesConfig,
    DEFAULT_THRESHOLD,
};

pub use crate::errors::{ConfigError, InputIssue, InvariantKind, SettlementError};

pub use crate::rules::{
    can_settle, validate_round, EliminationCause, Escape, ExplosionRules, GameResult, RoundEngine,
    RoundInput, RoundReport, Settlement, ValidatedRound,
};

pub use crate::session::GameSession;

pub use crate::sim::{
    simulate_batch, simulate_game, simulate_random_game, RandomScores, ScoreSource,
    SimulationConfig, SimulationOutcome,
};
