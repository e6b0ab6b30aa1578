//! Round rules: input validation, settlement and the engine trait.
//!
//! The presentation layer calls into `RoundEngine`; everything that decides
//! explosions, rollbacks and eliminations lives here.

pub mod engine;
pub mod input;
pub mod settlement;

pub use engine::{ExplosionRules, GameResult, RoundEngine};
pub use input::{can_settle, parse_score, validate_round, RoundInput, ValidatedRound};
pub use settlement::{EliminationCause, Escape, RoundReport, Settlement};
