//! Round input and validation.
//!
//! The presentation layer hands over raw text per player. A round can be
//! settled only when every active player has a present, non-empty,
//! whole, non-negative score. Entries for eliminated or unknown players are
//! ignored.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, Roster};
use crate::errors::{InputIssue, InvariantKind, SettlementError};

/// Raw per-player scores for one round, as typed by the players.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundInput {
    scores: FxHashMap<PlayerId, String>,
}

impl RoundInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw score entry.
    #[must_use]
    pub fn with_score(mut self, player: PlayerId, raw: impl Into<String>) -> Self {
        self.set(player, raw);
        self
    }

    /// Add a numeric score entry.
    #[must_use]
    pub fn with_points(self, player: PlayerId, points: u32) -> Self {
        self.with_score(player, points.to_string())
    }

    /// Set or replace a player's raw entry.
    pub fn set(&mut self, player: PlayerId, raw: impl Into<String>) {
        self.scores.insert(player, raw.into());
    }

    /// Remove a player's entry.
    pub fn remove(&mut self, player: PlayerId) -> Option<String> {
        self.scores.remove(&player)
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&str> {
        self.scores.get(&player).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.scores.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &str)> {
        self.scores.iter().map(|(id, raw)| (*id, raw.as_str()))
    }
}

impl<S: Into<String>> FromIterator<(PlayerId, S)> for RoundInput {
    fn from_iter<T: IntoIterator<Item = (PlayerId, S)>>(iter: T) -> Self {
        Self {
            scores: iter.into_iter().map(|(id, raw)| (id, raw.into())).collect(),
        }
    }
}

/// Parsed scores for every active player of a roster.
///
/// Only produced by [`validate_round`], so holding one means the round was
/// acceptable for the roster it was validated against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedRound {
    scores: FxHashMap<PlayerId, u32>,
}

impl ValidatedRound {
    #[must_use]
    pub fn score(&self, player: PlayerId) -> Option<u32> {
        self.scores.get(&player).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Parse one raw score entry.
///
/// Surrounding whitespace is ignored. Fractions are rejected as
/// non-numeric.
pub fn parse_score(player: PlayerId, raw: &str) -> Result<u32, InputIssue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputIssue::Empty(player));
    }

    let value: i64 = trimmed.parse().map_err(|_| InputIssue::NotNumeric {
        player,
        raw: raw.to_string(),
    })?;

    if value < 0 {
        return Err(InputIssue::Negative { player, value });
    }

    u32::try_from(value).map_err(|_| InputIssue::NotNumeric {
        player,
        raw: raw.to_string(),
    })
}

/// Validate a proposed round against a roster.
///
/// Issues are reported in seating order, one per offending player.
pub fn validate_round(
    roster: &Roster,
    input: &RoundInput,
) -> Result<ValidatedRound, SettlementError> {
    match roster.active_count() {
        0 => return Err(SettlementError::InvariantViolation(InvariantKind::NoActivePlayers)),
        1 => return Err(SettlementError::InvariantViolation(InvariantKind::GameDecided)),
        _ => {}
    }

    let mut scores = FxHashMap::default();
    let mut issues = Vec::new();

    for id in roster.active_ids() {
        let parsed = input
            .get(id)
            .ok_or(InputIssue::Missing(id))
            .and_then(|raw| parse_score(id, raw));

        match parsed {
            Ok(score) => {
                scores.insert(id, score);
            }
            Err(issue) => issues.push(issue),
        }
    }

    if issues.is_empty() {
        Ok(ValidatedRound { scores })
    } else {
        Err(SettlementError::InvalidInput(issues))
    }
}

/// Whether [`validate_round`] would accept the round.
#[must_use]
pub fn can_settle(roster: &Roster, input: &RoundInput) -> bool {
    validate_round(roster, input).is_ok()
}
