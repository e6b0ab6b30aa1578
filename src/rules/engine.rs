//! Round engine trait and the standard "99" rules.
//!
//! The presentation layer drives a game through `RoundEngine`:
//! - `validate` / `can_settle`: is the proposed round acceptable
//! - `settle`: produce the next roster snapshot
//! - `reset`: start over with the same players
//! - `is_terminal`: has someone won

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, Roster};
use crate::errors::SettlementError;

use super::input::{validate_round, RoundInput, ValidatedRound};
use super::settlement::{apply_round, Settlement};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single remaining player.
    Winner(PlayerId),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
        }
    }

    #[must_use]
    pub fn winner(&self) -> PlayerId {
        match self {
            GameResult::Winner(p) => *p,
        }
    }
}

/// Round engine trait.
///
/// ## Implementation Notes
///
/// - `settle` must not change the input roster; it returns a new snapshot
/// - `settle` must refuse exactly the rounds `validate` refuses
/// - Settlement must be deterministic
pub trait RoundEngine {
    /// Validate a proposed round.
    fn validate(
        &self,
        roster: &Roster,
        input: &RoundInput,
    ) -> Result<ValidatedRound, SettlementError>;

    /// Settle a round, returning the next roster and a report.
    fn settle(&self, roster: &Roster, input: &RoundInput) -> Result<Settlement, SettlementError>;

    /// A fresh roster with the same players and rules.
    fn reset(&self, roster: &Roster) -> Roster {
        roster.reset()
    }

    /// Check if the game is over.
    fn is_terminal(&self, roster: &Roster) -> Option<GameResult> {
        roster.winner().map(GameResult::Winner)
    }

    /// Whether `settle` would accept the round.
    fn can_settle(&self, roster: &Roster, input: &RoundInput) -> bool {
        self.validate(roster, input).is_ok()
    }
}

/// The standard explode-once, out-on-the-second rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExplosionRules;

impl ExplosionRules {
    pub fn new() -> Self {
        Self
    }
}

impl RoundEngine for ExplosionRules {
    fn validate(
        &self,
        roster: &Roster,
        input: &RoundInput,
    ) -> Result<ValidatedRound, SettlementError> {
        validate_round(roster, input)
    }

    fn settle(&self, roster: &Roster, input: &RoundInput) -> Result<Settlement, SettlementError> {
        let round = validate_round(roster, input).map_err(|err| {
            tracing::warn!(round = roster.rounds_played() + 1, %err, "settlement refused");
            err
        })?;

        Ok(apply_round(roster, &round))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::InvariantKind;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(PlayerId::new(1));
        assert!(!result.is_winner(PlayerId::new(0)));
        assert!(result.is_winner(PlayerId::new(1)));
        assert_eq!(result.winner(), PlayerId::new(1));
    }

    #[test]
    fn test_settle_refuses_invalid_round() {
        let engine = ExplosionRules::new();
        let roster = Roster::from_names(["A", "B"]).unwrap();
        let input = RoundInput::new().with_points(PlayerId::new(0), 10);

        assert!(!engine.can_settle(&roster, &input));
        assert!(matches!(
            engine.settle(&roster, &input),
            Err(SettlementError::InvalidInput(_))
        ));
        assert_eq!(roster.rounds_played(), 0);
    }

    #[test]
    fn test_settle_refuses_decided_game() {
        let engine = ExplosionRules::new();
        let roster = Roster::from_names(["A", "B"]).unwrap();
        let input = RoundInput::new()
            .with_points(PlayerId::new(0), 120)
            .with_points(PlayerId::new(1), 3);

        let decided = engine.settle(&roster, &input).unwrap().roster;
        assert_eq!(engine.is_terminal(&decided), Some(GameResult::Winner(PlayerId::new(1))));

        let again = RoundInput::new().with_points(PlayerId::new(1), 3);
        assert_eq!(
            engine.settle(&decided, &again).unwrap_err(),
            SettlementError::InvariantViolation(InvariantKind::GameDecided)
        );
    }

    #[test]
    fn test_reset_through_engine() {
        let engine = ExplosionRules::new();
        let roster = Roster::from_names(["A", "B", "C"]).unwrap();
        let input = RoundInput::new()
            .with_points(PlayerId::new(0), 10)
            .with_points(PlayerId::new(1), 20)
            .with_points(PlayerId::new(2), 30);

        let played = engine.settle(&roster, &input).unwrap().roster;
        assert_ne!(played, roster);
        assert_eq!(engine.reset(&played), roster);
        assert_eq!(engine.is_terminal(&roster), None);
    }
}
