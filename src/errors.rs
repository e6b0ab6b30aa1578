//! Error types for configuration, round input and settlement.

use crate::core::PlayerId;

/// Why a single player's score entry cannot be accepted.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputIssue {
    #[error("{0}: no score entered")]
    Missing(PlayerId),

    #[error("{0}: score is empty")]
    Empty(PlayerId),

    #[error("{player}: '{raw}' is not a whole number")]
    NotNumeric { player: PlayerId, raw: String },

    #[error("{player}: score {value} is negative")]
    Negative { player: PlayerId, value: i64 },

    #[error("{0} is not part of this game")]
    UnknownPlayer(PlayerId),

    #[error("{0} has been eliminated")]
    NotPlaying(PlayerId),
}

impl InputIssue {
    /// The player the issue refers to.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match self {
            InputIssue::Missing(player)
            | InputIssue::Empty(player)
            | InputIssue::UnknownPlayer(player)
            | InputIssue::NotPlaying(player) => *player,
            InputIssue::NotNumeric { player, .. } | InputIssue::Negative { player, .. } => *player,
        }
    }
}

/// Roster states in which no round may be settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantKind {
    #[error("roster has no active players")]
    NoActivePlayers,

    #[error("game already has a winner")]
    GameDecided,
}

/// Errors surfaced while validating or settling a round.
///
/// Neither variant is fatal: the roster is left untouched and the caller
/// may resubmit corrected input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SettlementError {
    #[error("round cannot be settled: {}", join_issues(.0))]
    InvalidInput(Vec<InputIssue>),

    #[error("invariant violation: {0}")]
    InvariantViolation(InvariantKind),
}

impl SettlementError {
    /// Issues attached to an `InvalidInput` error; empty otherwise.
    #[must_use]
    pub fn issues(&self) -> &[InputIssue] {
        match self {
            SettlementError::InvalidInput(issues) => issues,
            SettlementError::InvariantViolation(_) => &[],
        }
    }
}

fn join_issues(issues: &[InputIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised while building a roster from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse game config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("at least {min} players required, got {got}")]
    TooFewPlayers { min: usize, got: usize },

    #[error("at most 255 players supported, got {0}")]
    TooManyPlayers(usize),

    #[error("duplicate player id {0}")]
    DuplicateId(PlayerId),

    #[error("player at position {0} has a blank name")]
    BlankName(usize),

    #[error("threshold must be positive")]
    ZeroThreshold,

    #[error("inconsistent roster: {0}")]
    InconsistentRoster(&'static str),
}
