//! Score sources: who produces a round's scores.
//!
//! In a real game the players type them in. For simulation and tests a
//! `ScoreSource` stands in for the table.

use crate::core::{GameRng, Roster};
use crate::rules::RoundInput;

/// Produces one round of raw scores for the active players of a roster.
pub trait ScoreSource {
    fn next_round(&mut self, roster: &Roster) -> RoundInput;
}

impl<F> ScoreSource for F
where
    F: FnMut(&Roster) -> RoundInput,
{
    fn next_round(&mut self, roster: &Roster) -> RoundInput {
        self(roster)
    }
}

/// Uniform random scores in `0..=max_score` for every active player.
#[derive(Clone, Debug)]
pub struct RandomScores {
    rng: GameRng,
    max_score: u32,
}

impl RandomScores {
    pub fn new(seed: u64, max_score: u32) -> Self {
        Self::from_rng(GameRng::new(seed), max_score)
    }

    pub fn from_rng(rng: GameRng, max_score: u32) -> Self {
        Self { rng, max_score }
    }

    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.max_score
    }
}

impl ScoreSource for RandomScores {
    fn next_round(&mut self, roster: &Roster) -> RoundInput {
        roster
            .active_ids()
            .map(|id| (id, self.rng.gen_score(self.max_score).to_string()))
            .collect()
    }
}
