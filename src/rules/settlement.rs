//! Round settlement pipeline.
//!
//! Settlement runs on a clone of the roster and returns the clone, so a
//! caller only ever sees the roster before the round or fully after it.
//!
//! ## Order of rules
//!
//! 1. Append each active player's score and accumulate totals.
//! 2. Pad eliminated players' histories with a placeholder.
//! 3. Sweep: if all active players but one overflow, every overflowing
//!    player is eliminated and no rollback happens this round.
//! 4. Otherwise a first overflow marks the player exploded and a repeat
//!    overflow eliminates.
//! 5. The rollback total is the highest total among active players that
//!    did not overflow (0 if none).
//! 6. First-time overflows are rolled back to that total.
//! 7. Escape margins are recomputed for every active player.
//! 8. If exactly one active player has never exploded, every other active
//!    player is eliminated and that player wins.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Player, PlayerId, Roster};

use super::input::ValidatedRound;

/// A player that exploded and came back in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Escape {
    pub player: PlayerId,
    pub exploded_with: u32,
    pub restored_to: u32,
}

/// Which rule removed a player from the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EliminationCause {
    /// Overflowed after having already exploded once.
    SecondExplosion,
    /// Overflowed in a round where every other active player but one did too.
    Sweep,
    /// Still active only through an earlier escape when a single
    /// never-exploded player remained.
    LastSurvivor,
}

/// What happened in one settled round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    /// 1-based number of the settled round.
    pub round: u32,

    /// Players rolled back after exploding.
    pub escapes: SmallVec<[Escape; 4]>,

    /// Players eliminated this round, in the order the rules fired.
    pub eliminations: SmallVec<[(PlayerId, EliminationCause); 4]>,

    /// Rollback total computed this round. `None` when the sweep fired.
    pub rollback_total: Option<u32>,

    /// Whether the all-but-one sweep fired.
    pub sweep: bool,

    /// Winner, if this round decided the game.
    pub winner: Option<PlayerId>,
}

impl RoundReport {
    pub fn new(round: u32) -> Self {
        Self {
            round,
            ..Self::default()
        }
    }

    /// Players eliminated by a given rule.
    pub fn eliminated_by(
        &self,
        cause: EliminationCause,
    ) -> impl Iterator<Item = PlayerId> + '_ {
        self.eliminations
            .iter()
            .filter(move |(_, c)| *c == cause)
            .map(|(id, _)| *id)
    }

    #[must_use]
    pub fn was_eliminated(&self, player: PlayerId) -> bool {
        self.eliminations.iter().any(|(id, _)| *id == player)
    }

    #[must_use]
    pub fn escaped(&self, player: PlayerId) -> bool {
        self.escapes.iter().any(|e| e.player == player)
    }

    /// Whether the player's total was changed by anything other than
    /// their own score this round.
    #[must_use]
    pub fn touched(&self, player: PlayerId) -> bool {
        self.escaped(player) || self.was_eliminated(player)
    }

    #[must_use]
    pub fn is_final(&self) -> bool {
        self.winner.is_some()
    }
}

/// The roster after a round, plus what happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub roster: Roster,
    pub report: RoundReport,
}

type Ids = SmallVec<[PlayerId; 8]>;

/// Apply a validated round. The input roster is left untouched.
pub(crate) fn apply_round(roster: &Roster, round: &ValidatedRound) -> Settlement {
    let threshold = roster.threshold();
    let mut next = roster.clone();
    let mut report = RoundReport::new(roster.rounds_played() + 1);
    let active_before = roster.active_count();

    accumulate(&mut next, round);

    let overflowing: Ids = next
        .active_players()
        .filter(|p| p.overflows(threshold))
        .map(Player::id)
        .collect();

    tracing::debug!(
        round = report.round,
        active = active_before,
        overflowing = overflowing.len(),
        "scores accumulated"
    );

    if !overflowing.is_empty() && overflowing.len() + 1 == active_before {
        sweep(&mut next, &overflowing, &mut report);
    } else if !overflowing.is_empty() {
        explode(&mut next, &overflowing, &mut report);
    } else {
        report.rollback_total = Some(next.highest_escaped_total());
    }

    for player in next.players_mut() {
        player.refresh_margin(threshold);
    }

    detect_winner(&mut next, &mut report);
    next.advance_round();

    Settlement { roster: next, report }
}

fn accumulate(roster: &mut Roster, round: &ValidatedRound) {
    for player in roster.players_mut() {
        if player.is_playing() {
            player.record_score(round.score(player.id()).unwrap_or(0));
        } else {
            player.record_absence();
        }
    }
}

fn sweep(roster: &mut Roster, overflowing: &[PlayerId], report: &mut RoundReport) {
    for &id in overflowing {
        if let Some(player) = roster.player_mut(id) {
            player.note_explosion();
            player.eliminate();
            report.eliminations.push((id, EliminationCause::Sweep));
        }
    }
    report.sweep = true;

    tracing::debug!(
        round = report.round,
        eliminated = overflowing.len(),
        "all but one overflowed"
    );
}

fn explode(roster: &mut Roster, overflowing: &[PlayerId], report: &mut RoundReport) {
    let threshold = roster.threshold();

    let (mut doomed, mut escaping): (Ids, Ids) = overflowing
        .iter()
        .copied()
        .partition(|&id| roster.player(id).is_some_and(Player::has_exploded));

    // Everyone active is on a second overflow: the lowest totals stay in.
    if escaping.is_empty() && doomed.len() == roster.active_count() {
        let lowest = doomed
            .iter()
            .filter_map(|&id| roster.player(id).map(Player::total))
            .min()
            .unwrap_or(0);
        let (spared, rest): (Ids, Ids) = doomed
            .iter()
            .copied()
            .partition(|&id| roster.player(id).is_some_and(|p| p.total() == lowest));

        tracing::debug!(
            round = report.round,
            spared = spared.len(),
            "whole table overflowed again"
        );
        doomed = rest;
        escaping = spared;
    }

    for &id in &doomed {
        if let Some(player) = roster.player_mut(id) {
            player.note_explosion();
            player.eliminate();
            report.eliminations.push((id, EliminationCause::SecondExplosion));
        }
    }

    let rollback_total = roster.highest_escaped_total();
    report.rollback_total = Some(rollback_total);

    for &id in &escaping {
        if let Some(player) = roster.player_mut(id) {
            let exploded_with = player.total();
            player.note_explosion();
            player.roll_back(rollback_total, threshold);
            report.escapes.push(Escape {
                player: id,
                exploded_with,
                restored_to: rollback_total,
            });
        }
    }

    tracing::debug!(
        round = report.round,
        rollback_total,
        escaped = report.escapes.len(),
        eliminated = doomed.len(),
        "explosions resolved"
    );
}

fn detect_winner(roster: &mut Roster, report: &mut RoundReport) {
    let survivors: Ids = roster.survivors().map(Player::id).collect();

    if let [winner] = survivors.as_slice() {
        let winner = *winner;
        let escaped: Ids = roster.active_ids().filter(|&id| id != winner).collect();
        for id in escaped {
            if let Some(player) = roster.player_mut(id) {
                player.eliminate();
                report.eliminations.push((id, EliminationCause::LastSurvivor));
            }
        }
    }

    report.winner = roster.winner();
    if let Some(winner) = report.winner {
        tracing::info!(round = report.round, %winner, "game decided");
    }
}
