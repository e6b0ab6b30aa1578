//! Game configuration types.
//!
//! Callers configure a game at startup by providing:
//! - `RulesConfig`: explosion threshold and minimum table size
//! - `GameConfig`: the rules plus the static list of players
//!
//! `GameConfig` is serde-friendly so a player list can be bundled as JSON.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::PlayerId;
use crate::errors::ConfigError;

/// Point total above which a player explodes.
pub const DEFAULT_THRESHOLD: u32 = 99;

/// Scoring rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// A total strictly above this value explodes.
    pub threshold: u32,

    /// Smallest table a game can start with.
    pub min_players: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_players: 2,
        }
    }
}

impl RulesConfig {
    /// Create the standard "99" rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the explosion threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        assert!(threshold > 0, "Threshold must be positive");
        self.threshold = threshold;
        self
    }

    /// Set the minimum number of players.
    #[must_use]
    pub fn with_min_players(mut self, min_players: usize) -> Self {
        assert!(min_players >= 2, "A game needs at least 2 players");
        self.min_players = min_players;
        self
    }
}

/// A player entry in the starting list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpec {
    /// Explicit id. Defaults to the entry's position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PlayerId>,

    /// Display label.
    pub name: String,
}

impl PlayerSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

/// Complete game configuration.
///
/// ```
/// use ninety_nine::core::GameConfig;
///
/// let config = GameConfig::new()
///     .with_player("Ana")
///     .with_player("Bruno")
///     .with_threshold(50);
///
/// assert_eq!(config.player_count(), 2);
/// assert_eq!(config.rules.threshold, 50);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub rules: RulesConfig,

    pub players: Vec<PlayerSpec>,
}

impl GameConfig {
    /// Create an empty configuration with the standard rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from a plain list of names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rules: RulesConfig::default(),
            players: names.into_iter().map(PlayerSpec::named).collect(),
        }
    }

    /// Parse and validate a JSON document such as
    /// `{"players": [{"name": "Ana"}, {"name": "Bruno"}]}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Add a player with a positional id.
    #[must_use]
    pub fn with_player(mut self, name: impl Into<String>) -> Self {
        self.players.push(PlayerSpec::named(name));
        self
    }

    /// Add a player with an explicit id.
    #[must_use]
    pub fn with_player_id(mut self, id: PlayerId, name: impl Into<String>) -> Self {
        self.players.push(PlayerSpec {
            id: Some(id),
            name: name.into(),
        });
        self
    }

    /// Replace the rules.
    #[must_use]
    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Set the explosion threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.rules = self.rules.with_threshold(threshold);
        self
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Check table size, names and id uniqueness.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rules.threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }

        let count = self.players.len();
        let min = self.rules.min_players.max(2);
        if count < min {
            return Err(ConfigError::TooFewPlayers { min, got: count });
        }
        if count > 255 {
            return Err(ConfigError::TooManyPlayers(count));
        }

        if let Some(position) = self.players.iter().position(|p| p.name.trim().is_empty()) {
            return Err(ConfigError::BlankName(position));
        }

        let mut seen = FxHashSet::default();
        for (id, _) in self.resolved_players() {
            if !seen.insert(id) {
                return Err(ConfigError::DuplicateId(id));
            }
        }

        Ok(())
    }

    /// Player ids and names with positional defaults filled in.
    pub(crate) fn resolved_players(&self) -> impl Iterator<Item = (PlayerId, &str)> + '_ {
        self.players.iter().enumerate().map(|(position, spec)| {
            let id = spec.id.unwrap_or(PlayerId::new(position as u8));
            (id, spec.name.as_str())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_defaults() {
        let rules = RulesConfig::new();
        assert_eq!(rules.threshold, 99);
        assert_eq!(rules.min_players, 2);
    }

    #[test]
    #[should_panic(expected = "Threshold must be positive")]
    fn test_rules_zero_threshold() {
        let _ = RulesConfig::new().with_threshold(0);
    }

    #[test]
    fn test_game_config_builder() {
        let config = GameConfig::new()
            .with_player("Ana")
            .with_player_id(PlayerId::new(7), "Bruno")
            .with_rules(RulesConfig::new().with_min_players(2));

        assert_eq!(config.player_count(), 2);
        let resolved: Vec<_> = config.resolved_players().collect();
        assert_eq!(resolved, vec![(PlayerId::new(0), "Ana"), (PlayerId::new(7), "Bruno")]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_too_few_players() {
        let config = GameConfig::from_names(["Solo"]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooFewPlayers { min: 2, got: 1 })
        ));
    }

    #[test]
    fn test_validate_duplicate_id() {
        // Explicit id 1 collides with the positional id of the second entry.
        let config = GameConfig::new()
            .with_player_id(PlayerId::new(1), "Ana")
            .with_player("Bruno");

        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateId(id)) if id == PlayerId::new(1)
        ));
    }

    #[test]
    fn test_validate_blank_name() {
        let config = GameConfig::from_names(["Ana", "  "]);
        assert!(matches!(config.validate(), Err(ConfigError::BlankName(1))));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{"players": [
            {"name": "Ana"},
            {"name": "Bruno"},
            {"id": 9, "name": "Caio"}
        ]}"#;
        let config = GameConfig::from_json(json).unwrap();

        assert_eq!(config.rules, RulesConfig::default());
        assert_eq!(config.players[2].id, Some(PlayerId::new(9)));
        assert_eq!(config.players[0].name, "Ana");
    }

    #[test]
    fn test_from_json_with_rules() {
        let json = r#"{"rules": {"threshold": 50}, "players": [{"name": "A"}, {"name": "B"}]}"#;
        let config = GameConfig::from_json(json).unwrap();

        assert_eq!(config.rules.threshold, 50);
        assert_eq!(config.rules.min_players, 2);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(GameConfig::from_json("not json"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = GameConfig::from_names(["Ana", "Bruno"]).with_threshold(120);
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
