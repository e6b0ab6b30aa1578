//! Roster: the complete set of player records at a point in time.
//!
//! A `Roster` is an immutable snapshot from the caller's point of view.
//! Settlement clones it (O(1) thanks to `im::Vector`), applies the round to
//! the clone and hands back the new snapshot, so the previous state is never
//! observed half-updated.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::{GameConfig, PlayerSpec, RulesConfig};
use super::player::{Player, PlayerId};
use crate::errors::ConfigError;

/// Player records plus the rules they are scored under.
///
/// Deserializing re-checks the snapshot, so a hand-edited document cannot
/// produce a roster that settlement could never have reached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RosterRecord")]
pub struct Roster {
    rules: RulesConfig,
    players: Vector<Player>,
    rounds_played: u32,
}

/// Unchecked wire form of a [`Roster`].
#[derive(Deserialize)]
struct RosterRecord {
    rules: RulesConfig,
    players: Vector<Player>,
    rounds_played: u32,
}

impl TryFrom<RosterRecord> for Roster {
    type Error = ConfigError;

    fn try_from(record: RosterRecord) -> Result<Self, Self::Error> {
        let RosterRecord {
            rules,
            players,
            rounds_played,
        } = record;

        // Same rules as a starting configuration.
        GameConfig {
            rules,
            players: players
                .iter()
                .map(|p| PlayerSpec {
                    id: Some(p.id()),
                    name: p.name().to_string(),
                })
                .collect(),
        }
        .validate()?;

        if players
            .iter()
            .any(|p| p.rounds_recorded() != rounds_played as usize)
        {
            return Err(ConfigError::InconsistentRoster(
                "history length differs from rounds played",
            ));
        }
        if !players.iter().any(Player::is_playing) {
            return Err(ConfigError::InconsistentRoster("no active players"));
        }
        if !players.iter().all(|p| p.margin_matches(rules.threshold)) {
            return Err(ConfigError::InconsistentRoster(
                "escape margin does not match total",
            ));
        }

        Ok(Self {
            rules,
            players,
            rounds_played,
        })
    }
}

impl Roster {
    /// Create a fresh roster from a validated configuration.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let threshold = config.rules.threshold;
        let players = config
            .resolved_players()
            .map(|(id, name)| Player::new(id, name, threshold))
            .collect();

        Ok(Self {
            rules: config.rules,
            players,
            rounds_played: 0,
        })
    }

    /// Create a fresh roster with standard rules and positional ids.
    pub fn from_names<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(&GameConfig::from_names(names))
    }

    #[must_use]
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    #[must_use]
    pub fn threshold(&self) -> u32 {
        self.rules.threshold
    }

    /// Number of settled rounds.
    #[must_use]
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Number of players, active or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// All players in seating order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Look up a player by id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    /// Players still in the game.
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_playing())
    }

    pub fn active_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.active_players().map(Player::id)
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active_players().count()
    }

    /// Active players who have never exploded.
    pub fn survivors(&self) -> impl Iterator<Item = &Player> {
        self.active_players().filter(|p| !p.has_exploded())
    }

    /// True once a single active player remains.
    #[must_use]
    pub fn is_decided(&self) -> bool {
        self.active_count() == 1
    }

    /// The winner, once the game is decided.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        let mut active = self.active_ids();
        match (active.next(), active.next()) {
            (Some(id), None) => Some(id),
            _ => None,
        }
    }

    /// Highest total among active players that has not overflowed.
    ///
    /// This is the value an exploding player would be rolled back to.
    #[must_use]
    pub fn highest_escaped_total(&self) -> u32 {
        let threshold = self.threshold();
        self.active_players()
            .map(Player::total)
            .filter(|&total| total <= threshold)
            .max()
            .unwrap_or(0)
    }

    /// Fresh roster with the same players and rules.
    #[must_use]
    pub fn reset(&self) -> Self {
        let threshold = self.threshold();
        let mut fresh = self.clone();
        for player in fresh.players.iter_mut() {
            player.reset(threshold);
        }
        fresh.rounds_played = 0;
        fresh
    }

    // === Settlement access ===

    pub(crate) fn players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id() == id)
    }

    pub(crate) fn advance_round(&mut self) {
        self.rounds_played += 1;
    }
}
