//! Property tests over randomly played games.
//!
//! Properties tested:
//! - History alignment: every player's history has one entry per round
//! - Escape invariant: active players stay at or under the threshold with
//!   `escape_margin == threshold - total`
//! - Conservation: an untouched active player's total grows by their score
//! - Eliminated players are never changed again (besides placeholders)
//! - At least one player is always active; a single active player is the winner
//! - Settlement never changes its input roster
//! - Reset is idempotent and restores the starting roster

use proptest::prelude::*;

use ninety_nine::{ExplosionRules, Player, PlayerId, RoundEngine, RoundEntry, RoundInput, Roster};

fn roster_of(player_count: usize) -> Roster {
    Roster::from_names((0..player_count).map(|i| format!("P{}", i))).unwrap()
}

/// Round input from a pool of scores, one per active player in seating order.
fn round_from(roster: &Roster, scores: &[u32]) -> RoundInput {
    roster
        .active_ids()
        .zip(scores.iter().cycle())
        .map(|(id, score)| (id, score.to_string()))
        .collect()
}

fn games() -> impl Strategy<Value = (usize, Vec<Vec<u32>>)> {
    (2usize..=6).prop_flat_map(|players| {
        (
            Just(players),
            prop::collection::vec(prop::collection::vec(0u32..=60, players), 1..40),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_settlement_invariants((player_count, rounds) in games()) {
        let engine = ExplosionRules::new();
        let mut roster = roster_of(player_count);
        let threshold = roster.threshold();

        for scores in &rounds {
            if engine.is_terminal(&roster).is_some() {
                break;
            }

            let input = round_from(&roster, scores);
            let before = roster.clone();
            let settlement = engine.settle(&roster, &input).unwrap();
            let report = &settlement.report;
            let next = settlement.roster;

            prop_assert_eq!(&roster, &before, "input roster changed");
            prop_assert_eq!(next.rounds_played(), before.rounds_played() + 1);
            prop_assert!(next.active_count() >= 1);

            for player in next.players() {
                prop_assert_eq!(player.points().len() as u32, next.rounds_played());

                let old: &Player = before.player(player.id()).unwrap();

                if !old.is_playing() {
                    prop_assert!(!player.is_playing());
                    prop_assert_eq!(player.total(), old.total());
                    prop_assert_eq!(player.points().last(), Some(&RoundEntry::Out));
                    prop_assert_eq!(player.exploded_with_total(), old.exploded_with_total());
                    continue;
                }

                let score: u32 = input.get(player.id()).unwrap().parse().unwrap();
                prop_assert_eq!(player.points().last(), Some(&RoundEntry::Scored(score)));

                if !report.touched(player.id()) {
                    prop_assert_eq!(player.total(), old.total() + score);
                }

                if player.is_playing() {
                    prop_assert!(player.total() <= threshold);
                    prop_assert_eq!(player.escape_margin(), Some(threshold - player.total()));
                } else {
                    prop_assert_eq!(player.escape_margin(), None);
                }
            }

            if next.active_count() == 1 {
                prop_assert_eq!(report.winner, next.winner());
                prop_assert!(report.winner.is_some());
            } else {
                prop_assert_eq!(report.winner, None);
                prop_assert_ne!(next.survivors().count(), 1);
            }

            roster = next;
        }
    }

    #[test]
    fn prop_escape_restores_highest_non_overflowing_total((player_count, rounds) in games()) {
        let engine = ExplosionRules::new();
        let mut roster = roster_of(player_count);

        for scores in &rounds {
            if engine.is_terminal(&roster).is_some() {
                break;
            }

            let settlement = engine.settle(&roster, &round_from(&roster, scores)).unwrap();
            for escape in &settlement.report.escapes {
                let player = settlement.roster.player(escape.player).unwrap();
                prop_assert!(player.has_exploded());
                prop_assert_eq!(Some(escape.restored_to), settlement.report.rollback_total);
                prop_assert_eq!(player.restored_to_total(), Some(escape.restored_to));
                prop_assert!(escape.exploded_with > roster.threshold());
            }
            roster = settlement.roster;
        }
    }

    #[test]
    fn prop_reset_is_idempotent((player_count, rounds) in games()) {
        let engine = ExplosionRules::new();
        let fresh = roster_of(player_count);
        let mut roster = fresh.clone();

        for scores in &rounds {
            if engine.is_terminal(&roster).is_some() {
                break;
            }
            roster = engine.settle(&roster, &round_from(&roster, scores)).unwrap().roster;
        }

        let once = engine.reset(&roster);
        let twice = engine.reset(&once);
        prop_assert_eq!(&once, &fresh);
        prop_assert_eq!(&twice, &once);
    }

    #[test]
    fn prop_incomplete_round_is_refused(
        player_count in 2usize..=6,
        missing in 0usize..6,
        scores in prop::collection::vec(0u32..=60, 6),
    ) {
        let engine = ExplosionRules::new();
        let roster = roster_of(player_count);
        let mut input = round_from(&roster, &scores);
        input.remove(PlayerId::new((missing % player_count) as u8));

        prop_assert!(!engine.can_settle(&roster, &input));
        prop_assert!(engine.settle(&roster, &input).is_err());
    }
}
