//! Play whole games against a score source.

use crate::core::{GameRng, Roster};
use crate::errors::SettlementError;
use crate::rules::{GameResult, RoundEngine, RoundReport};

use super::source::{RandomScores, ScoreSource};

/// Configuration for simulated games.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    /// Round cap, so a game of endless escapes still terminates.
    pub max_rounds: u32,

    /// Highest score a random player can draw.
    pub max_score: u32,

    /// Seed for the random score source.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_rounds: 200,
            max_score: 30,
            seed: 0,
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    #[must_use]
    pub fn with_max_score(mut self, score: u32) -> Self {
        self.max_score = score;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Random score source matching this configuration.
    pub fn score_source(&self) -> RandomScores {
        RandomScores::new(self.seed, self.max_score)
    }
}

/// Final state of a simulated game.
#[derive(Clone, Debug)]
pub struct SimulationOutcome {
    /// Roster after the last settled round.
    pub roster: Roster,

    /// One report per settled round.
    pub reports: Vec<RoundReport>,

    /// `None` if the round cap was hit first.
    pub result: Option<GameResult>,
}

impl SimulationOutcome {
    pub fn rounds(&self) -> usize {
        self.reports.len()
    }
}

/// Settle rounds from `source` until the game is decided or `max_rounds`
/// rounds have been played.
///
/// A round the source gets wrong aborts the simulation with the
/// settlement error.
pub fn simulate_game<E, S>(
    engine: &E,
    roster: Roster,
    source: &mut S,
    max_rounds: u32,
) -> Result<SimulationOutcome, SettlementError>
where
    E: RoundEngine,
    S: ScoreSource,
{
    let mut roster = roster;
    let mut reports = Vec::new();

    while engine.is_terminal(&roster).is_none() && (reports.len() as u32) < max_rounds {
        let input = source.next_round(&roster);
        let settlement = engine.settle(&roster, &input)?;
        roster = settlement.roster;
        reports.push(settlement.report);
    }

    let result = engine.is_terminal(&roster);
    tracing::debug!(
        rounds = reports.len(),
        decided = result.is_some(),
        "simulation finished"
    );

    Ok(SimulationOutcome {
        roster,
        reports,
        result,
    })
}

/// Simulate a game with random scores.
pub fn simulate_random_game<E: RoundEngine>(
    engine: &E,
    roster: Roster,
    config: &SimulationConfig,
) -> Result<SimulationOutcome, SettlementError> {
    let mut source = config.score_source();
    simulate_game(engine, roster, &mut source, config.max_rounds)
}

/// Simulate `games` independent games from the same starting roster.
///
/// Each game draws from its own fork of one root RNG seeded with
/// `config.seed`, so the whole batch replays from that single seed.
pub fn simulate_batch<E: RoundEngine>(
    engine: &E,
    roster: &Roster,
    config: &SimulationConfig,
    games: usize,
) -> Result<Vec<SimulationOutcome>, SettlementError> {
    let mut root = GameRng::new(config.seed);
    let mut outcomes = Vec::with_capacity(games);

    for _ in 0..games {
        let mut source = RandomScores::from_rng(root.fork(), config.max_score);
        outcomes.push(simulate_game(engine, roster.clone(), &mut source, config.max_rounds)?);
    }

    let decided = outcomes.iter().filter(|o| o.result.is_some()).count();
    tracing::info!(games, decided, seed = config.seed, "batch finished");

    Ok(outcomes)
}
