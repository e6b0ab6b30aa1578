//! Game session: the current roster snapshot plus the round being typed in.
//!
//! A session is what a score-keeping screen holds. Score edits land in the
//! pending round; `submit` settles it, installs the new snapshot and starts
//! the next round with an empty pending map.

use crate::core::{GameConfig, PlayerId, Roster};
use crate::errors::{ConfigError, InputIssue, SettlementError};
use crate::rules::{ExplosionRules, GameResult, RoundEngine, RoundInput, RoundReport};

/// A game in progress.
#[derive(Clone, Debug)]
pub struct GameSession<E: RoundEngine = ExplosionRules> {
    engine: E,
    roster: Roster,
    pending: RoundInput,
    reports: Vec<RoundReport>,
}

impl GameSession<ExplosionRules> {
    /// Start a session with the standard rules.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_engine(ExplosionRules::new(), Roster::new(config)?))
    }
}

impl<E: RoundEngine> GameSession<E> {
    /// Start a session from an existing roster.
    pub fn with_engine(engine: E, roster: Roster) -> Self {
        Self {
            engine,
            roster,
            pending: RoundInput::new(),
            reports: Vec::new(),
        }
    }

    /// Current roster snapshot.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// 1-based number of the round being entered.
    pub fn round_number(&self) -> u32 {
        self.roster.rounds_played() + 1
    }

    /// Reports of every settled round since the last reset.
    pub fn reports(&self) -> &[RoundReport] {
        &self.reports
    }

    /// Pending scores for the round being entered.
    pub fn pending(&self) -> &RoundInput {
        &self.pending
    }

    pub fn pending_score(&self, player: PlayerId) -> Option<&str> {
        self.pending.get(player)
    }

    /// Record a raw score for an active player.
    ///
    /// The text is stored as typed; it is only parsed on validation.
    pub fn set_score(
        &mut self,
        player: PlayerId,
        raw: impl Into<String>,
    ) -> Result<(), SettlementError> {
        match self.roster.player(player) {
            None => Err(SettlementError::InvalidInput(vec![InputIssue::UnknownPlayer(player)])),
            Some(p) if !p.is_playing() => {
                Err(SettlementError::InvalidInput(vec![InputIssue::NotPlaying(player)]))
            }
            Some(_) => {
                self.pending.set(player, raw);
                Ok(())
            }
        }
    }

    pub fn clear_score(&mut self, player: PlayerId) {
        self.pending.remove(player);
    }

    /// Whether the pending round can be submitted.
    pub fn can_submit(&self) -> bool {
        self.engine.can_settle(&self.roster, &self.pending)
    }

    /// Problems with the pending round, if any.
    pub fn pending_issues(&self) -> Vec<InputIssue> {
        match self.engine.validate(&self.roster, &self.pending) {
            Ok(_) => Vec::new(),
            Err(err) => err.issues().to_vec(),
        }
    }

    /// Settle the pending round and start the next one.
    ///
    /// On error nothing changes, including the pending scores.
    pub fn submit(&mut self) -> Result<&RoundReport, SettlementError> {
        let settlement = self.engine.settle(&self.roster, &self.pending)?;

        self.roster = settlement.roster;
        self.pending.clear();
        self.reports.push(settlement.report);

        let last = self.reports.len() - 1;
        Ok(&self.reports[last])
    }

    /// Start the game over with the same players.
    pub fn reset(&mut self) {
        self.roster = self.engine.reset(&self.roster);
        self.pending.clear();
        self.reports.clear();

        tracing::info!(players = self.roster.len(), "game reset");
    }

    /// The result once the game is decided.
    pub fn result(&self) -> Option<GameResult> {
        self.engine.is_terminal(&self.roster)
    }

    /// Value an exploding player would currently be rolled back to.
    pub fn highest_escaped_total(&self) -> u32 {
        self.roster.highest_escaped_total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(&GameConfig::from_names(["Ana", "Bruno", "Caio"])).unwrap()
    }

    fn p(id: u8) -> PlayerId {
        PlayerId::new(id)
    }

    #[test]
    fn test_new_session() {
        let s = session();
        assert_eq!(s.round_number(), 1);
        assert!(s.pending().is_empty());
        assert!(s.reports().is_empty());
        assert!(!s.can_submit());
        assert_eq!(s.result(), None);
    }

    #[test]
    fn test_can_submit_tracks_edits() {
        let mut s = session();
        s.set_score(p(0), "10").unwrap();
        s.set_score(p(1), "20").unwrap();
        assert!(!s.can_submit());
        assert_eq!(s.pending_issues(), vec![InputIssue::Missing(p(2))]);

        s.set_score(p(2), "abc").unwrap();
        assert!(!s.can_submit());

        s.set_score(p(2), "5").unwrap();
        assert!(s.can_submit());
        assert!(s.pending_issues().is_empty());

        s.clear_score(p(1));
        assert!(!s.can_submit());
        assert_eq!(s.pending_score(p(1)), None);
    }

    #[test]
    fn test_submit_advances_round() {
        let mut s = session();
        for (id, raw) in [(0, "10"), (1, "20"), (2, "30")] {
            s.set_score(p(id), raw).unwrap();
        }

        let report = s.submit().unwrap();
        assert_eq!(report.round, 1);

        assert_eq!(s.round_number(), 2);
        assert!(s.pending().is_empty());
        assert_eq!(s.reports().len(), 1);
        assert_eq!(s.roster().player(p(2)).unwrap().total(), 30);
        assert_eq!(s.highest_escaped_total(), 30);
    }

    #[test]
    fn test_failed_submit_keeps_pending() {
        let mut s = session();
        s.set_score(p(0), "10").unwrap();

        assert!(matches!(s.submit(), Err(SettlementError::InvalidInput(_))));
        assert_eq!(s.pending_score(p(0)), Some("10"));
        assert_eq!(s.round_number(), 1);
    }

    #[test]
    fn test_set_score_refuses_unknown_and_eliminated() {
        let mut s = session();
        assert_eq!(
            s.set_score(p(7), "1"),
            Err(SettlementError::InvalidInput(vec![InputIssue::UnknownPlayer(p(7))]))
        );

        // Two of three overflow: both are swept out.
        for (id, raw) in [(0, "100"), (1, "100"), (2, "1")] {
            s.set_score(p(id), raw).unwrap();
        }
        s.submit().unwrap();

        assert_eq!(
            s.set_score(p(0), "1"),
            Err(SettlementError::InvalidInput(vec![InputIssue::NotPlaying(p(0))]))
        );
        assert_eq!(s.result(), Some(GameResult::Winner(p(2))));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut s = session();
        for (id, raw) in [(0, "10"), (1, "20"), (2, "30")] {
            s.set_score(p(id), raw).unwrap();
        }
        s.submit().unwrap();
        s.set_score(p(0), "4").unwrap();

        s.reset();
        let once = s.roster().clone();
        s.reset();

        assert_eq!(s.roster(), &once);
        assert_eq!(s.round_number(), 1);
        assert!(s.pending().is_empty());
        assert!(s.reports().is_empty());
        assert!(s.roster().players().all(|p| p.total() == 0 && p.points().is_empty()));
    }
}
