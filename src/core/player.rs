//! Player identification and per-player score records.
//!
//! ## PlayerId
//!
//! Type-safe player identifier supporting up to 255 players.
//!
//! ## Player
//!
//! One record per participant: round history, running total, escape
//! margin and explosion status. Fields are read through accessors; only the
//! settlement pipeline mutates them.

use serde::{Deserialize, Serialize};

/// Player identifier supporting up to 255 players.
///
/// Ids assigned from a plain name list are 0-based positions: the first
/// player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One entry of a player's round history.
///
/// Eliminated players receive `Out` for every round after their
/// elimination so all histories stay the same length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEntry {
    /// Score submitted for the round.
    Scored(u32),
    /// Placeholder for a round the player sat out.
    Out,
}

impl RoundEntry {
    /// Numeric value of the entry. Placeholders count as zero.
    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            RoundEntry::Scored(points) => points,
            RoundEntry::Out => 0,
        }
    }

    #[must_use]
    pub const fn is_placeholder(self) -> bool {
        matches!(self, RoundEntry::Out)
    }
}

impl std::fmt::Display for RoundEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundEntry::Scored(points) => write!(f, "{}", points),
            RoundEntry::Out => write!(f, "-"),
        }
    }
}

/// A participant's record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    points: Vec<RoundEntry>,
    total: u32,
    escape_margin: Option<u32>,
    is_playing: bool,
    has_exploded: bool,
    exploded_with_total: Option<u32>,
    restored_to_total: Option<u32>,
}

impl Player {
    /// Create a fresh, active player.
    pub fn new(id: PlayerId, name: impl Into<String>, threshold: u32) -> Self {
        Self {
            id,
            name: name.into(),
            points: Vec::new(),
            total: 0,
            escape_margin: Some(threshold),
            is_playing: true,
            has_exploded: false,
            exploded_with_total: None,
            restored_to_total: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Round history, one entry per completed round.
    #[must_use]
    pub fn points(&self) -> &[RoundEntry] {
        &self.points
    }

    /// Running total after the most recent settlement.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Headroom before the next overflow. `None` once eliminated.
    #[must_use]
    pub fn escape_margin(&self) -> Option<u32> {
        self.escape_margin
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Whether the player has overflowed at least once.
    #[must_use]
    pub fn has_exploded(&self) -> bool {
        self.has_exploded
    }

    /// Total at the moment of the most recent explosion.
    #[must_use]
    pub fn exploded_with_total(&self) -> Option<u32> {
        self.exploded_with_total
    }

    /// Total the player was rolled back to after escaping.
    #[must_use]
    pub fn restored_to_total(&self) -> Option<u32> {
        self.restored_to_total
    }

    /// Sum of the numeric history entries.
    ///
    /// Differs from [`total`](Self::total) by the net effect of rollbacks.
    #[must_use]
    pub fn points_sum(&self) -> u32 {
        self.points.iter().map(|entry| entry.value()).sum()
    }

    /// Number of completed rounds recorded for this player.
    #[must_use]
    pub fn rounds_recorded(&self) -> usize {
        self.points.len()
    }

    // === Settlement mutations ===

    pub(crate) fn record_score(&mut self, score: u32) {
        self.points.push(RoundEntry::Scored(score));
        self.total = self.total.saturating_add(score);
    }

    pub(crate) fn record_absence(&mut self) {
        self.points.push(RoundEntry::Out);
    }

    pub(crate) fn overflows(&self, threshold: u32) -> bool {
        self.total > threshold
    }

    /// Mark an overflow: sets the explosion flag and remembers the total.
    pub(crate) fn note_explosion(&mut self) {
        self.has_exploded = true;
        self.exploded_with_total = Some(self.total);
    }

    pub(crate) fn roll_back(&mut self, to: u32, threshold: u32) {
        self.total = to;
        self.restored_to_total = Some(to);
        self.refresh_margin(threshold);
    }

    pub(crate) fn eliminate(&mut self) {
        self.is_playing = false;
        self.escape_margin = None;
    }

    /// Recompute the escape margin. Never exposes a margin for an
    /// overflowing total.
    pub(crate) fn refresh_margin(&mut self, threshold: u32) {
        self.escape_margin = if self.is_playing {
            threshold.checked_sub(self.total)
        } else {
            None
        };
    }

    /// Whether the stored margin is the one [`refresh_margin`](Self::refresh_margin)
    /// would compute. Active players above the threshold never qualify.
    pub(crate) fn margin_matches(&self, threshold: u32) -> bool {
        match (self.is_playing, self.escape_margin) {
            (true, Some(margin)) => threshold.checked_sub(self.total) == Some(margin),
            (false, None) => true,
            _ => false,
        }
    }

    pub(crate) fn reset(&mut self, threshold: u32) {
        *self = Player::new(self.id, std::mem::take(&mut self.name), threshold);
    }
}
