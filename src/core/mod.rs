//! Core types: players, roster state, configuration, RNG.
//!
//! These are the data the round rules operate on. Nothing here knows how a
//! round is settled; see `rules` for that.

pub mod player;
pub mod config;
pub mod state;
pub mod rng;

pub use player::{Player, PlayerId, RoundEntry};
pub use config::{GameConfig, PlayerSpec, RulesConfig, DEFAULT_THRESHOLD};
pub use state::Roster;
pub use rng::GameRng;
