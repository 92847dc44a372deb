//! Per-player stat records.
//!
//! ## StatLine
//!
//! One player's counters, a fixed array indexed by `StatKind`. Serializes as
//! a map of non-zero counters keyed by display name.
//!
//! ## StatRecord
//!
//! `PlayerId -> StatLine` over an `im::OrdMap`, so cloning a record for an
//! undo snapshot shares structure with the live one.

use im::OrdMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::kind::StatKind;
use super::rules::Increment;
use crate::core::PlayerId;

/// One player's counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "BTreeMap<StatKind, u32>", into = "BTreeMap<StatKind, u32>")]
pub struct StatLine([u32; StatKind::COUNT]);

impl StatLine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter for a stat.
    #[must_use]
    pub const fn get(&self, stat: StatKind) -> u32 {
        self.0[stat.index()]
    }

    pub fn increment(&mut self, stat: StatKind) {
        self.0[stat.index()] += 1;
    }

    /// Add another line counter by counter.
    pub fn add(&mut self, other: &StatLine) {
        for (mine, theirs) in self.0.iter_mut().zip(other.0.iter()) {
            *mine += theirs;
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    /// `(Kill - Hit Error) / Hit Attempt`, zero with no attempts.
    #[must_use]
    pub fn hitting_percentage(&self) -> HittingPercentage {
        let attempts = self.get(StatKind::HitAttempt);
        if attempts == 0 {
            return HittingPercentage(0.0);
        }
        let kills = f64::from(self.get(StatKind::Kill));
        let errors = f64::from(self.get(StatKind::HitError));
        HittingPercentage((kills - errors) / f64::from(attempts))
    }

    /// Counters in stat-sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (StatKind, u32)> + '_ {
        StatKind::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

impl From<BTreeMap<StatKind, u32>> for StatLine {
    fn from(map: BTreeMap<StatKind, u32>) -> Self {
        let mut line = StatLine::default();
        for (kind, count) in map {
            line.0[kind.index()] = count;
        }
        line
    }
}

impl From<StatLine> for BTreeMap<StatKind, u32> {
    fn from(line: StatLine) -> Self {
        line.iter().filter(|&(_, n)| n > 0).collect()
    }
}

/// Hitting percentage, displayed with three decimals.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct HittingPercentage(pub f64);

impl HittingPercentage {
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for HittingPercentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

/// Stat lines for every player in one scope (set or match).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRecord {
    lines: OrdMap<PlayerId, StatLine>,
}

impl StatRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A zeroed line for every player.
    #[must_use]
    pub fn for_players(players: impl IntoIterator<Item = PlayerId>) -> Self {
        Self {
            lines: players.into_iter().map(|p| (p, StatLine::default())).collect(),
        }
    }

    /// A player's line. Unknown players read as all zeros.
    #[must_use]
    pub fn line(&self, player: PlayerId) -> StatLine {
        self.lines.get(&player).copied().unwrap_or_default()
    }

    /// A single counter.
    #[must_use]
    pub fn get(&self, player: PlayerId, stat: StatKind) -> u32 {
        self.line(player).get(stat)
    }

    pub fn increment(&mut self, player: PlayerId, stat: StatKind) {
        let mut line = self.line(player);
        line.increment(stat);
        self.lines.insert(player, line);
    }

    /// Apply a batch of increments.
    pub fn apply(&mut self, increments: &[Increment]) {
        for inc in increments {
            self.increment(inc.player, inc.stat);
        }
    }

    /// Sum of every line for the given players.
    #[must_use]
    pub fn team_totals(&self, players: impl IntoIterator<Item = PlayerId>) -> StatLine {
        players.into_iter().fold(StatLine::default(), |mut acc, p| {
            acc.add(&self.line(p));
            acc
        })
    }

    /// `(player, line)` pairs in id order.
    #[must_use]
    pub fn entries(&self) -> Vec<(PlayerId, StatLine)> {
        self.lines.iter().map(|(p, l)| (*p, *l)).collect()
    }

    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (PlayerId, StatLine)>) -> Self {
        Self {
            lines: entries.into_iter().collect(),
        }
    }

    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.lines.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hitting_percentage() {
        let mut line = StatLine::new();
        assert_eq!(line.hitting_percentage().to_string(), "0.000");

        for _ in 0..3 {
            line.increment(StatKind::Kill);
        }
        line.increment(StatKind::HitError);
        for _ in 0..8 {
            line.increment(StatKind::HitAttempt);
        }

        assert_eq!(line.hitting_percentage().value(), 0.25);
        assert_eq!(line.hitting_percentage().to_string(), "0.250");
    }

    #[test]
    fn test_negative_hitting_percentage() {
        let mut line = StatLine::new();
        line.increment(StatKind::HitError);
        for _ in 0..10 {
            line.increment(StatKind::HitAttempt);
        }
        assert_eq!(line.hitting_percentage().to_string(), "-0.100");
    }

    #[test]
    fn test_record_increment_and_totals() {
        let mut record = StatRecord::for_players([PlayerId(1), PlayerId(2)]);
        record.increment(PlayerId(1), StatKind::Dig);
        record.increment(PlayerId(2), StatKind::Dig);
        record.increment(PlayerId(2), StatKind::Kill);

        let totals = record.team_totals([PlayerId(1), PlayerId(2)]);
        assert_eq!(totals.get(StatKind::Dig), 2);
        assert_eq!(totals.get(StatKind::Kill), 1);
        assert_eq!(record.get(PlayerId(9), StatKind::Dig), 0);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut record = StatRecord::for_players([PlayerId(1)]);
        let snapshot = record.clone();

        record.increment(PlayerId(1), StatKind::Ace);

        assert_eq!(snapshot.get(PlayerId(1), StatKind::Ace), 0);
        assert_ne!(snapshot, record);
    }

    #[test]
    fn test_stat_line_serializes_non_zero_counters() {
        let mut line = StatLine::new();
        line.increment(StatKind::Kill);
        line.increment(StatKind::Kill);

        let json = serde_json::to_string(&line).unwrap();
        assert_eq!(json, r#"{"Kill":2}"#);

        let restored: StatLine = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, line);
    }
}
