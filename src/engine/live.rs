//! Live match state: everything an undo snapshot captures.
//!
//! Uses `im` persistent collections so a snapshot is a structural-sharing
//! clone rather than a deep copy.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{MatchState, PlayerId};
use crate::lineup::Lineup;
use crate::stats::{Increment, RotationScores, StatRecord};
use crate::subs::SubstitutionLedger;

/// A compound action waiting for its second input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingAction {
    /// A KWDA kill was recorded; the assist has not been assigned yet.
    AssistFor { attacker: PlayerId },
}

/// Human-readable event log, most recent first.
///
/// Observational only. Nothing in the engine reads it back.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointLog(Vector<String>);

impl PointLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry at the front.
    pub fn push(&mut self, entry: impl Into<String>) {
        self.0.push_front(entry.into());
    }

    /// Most recent entry.
    #[must_use]
    pub fn latest(&self) -> Option<&str> {
        self.0.front().map(String::as_str)
    }

    /// Entries, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl From<Vec<String>> for PointLog {
    fn from(entries: Vec<String>) -> Self {
        Self(entries.into_iter().collect())
    }
}

/// All mutable match data for the current set.
///
/// Cloning is cheap; `History` stores whole `LiveState` values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LiveState {
    /// Scoreboard.
    pub board: MatchState,

    /// Court slots, libero and setter.
    pub lineup: Lineup,

    /// Stats for the whole match.
    pub match_stats: StatRecord,

    /// Stats for the current set.
    pub set_stats: StatRecord,

    pub point_log: PointLog,

    /// Rostered players not on court and not the libero.
    pub bench: Vector<PlayerId>,

    pub ledger: SubstitutionLedger,

    pub rotation_scores: RotationScores,

    pub pending: Option<PendingAction>,
}

impl LiveState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply increments to both the match and set scopes.
    pub fn record_increments(&mut self, increments: &[Increment]) {
        self.match_stats.apply(increments);
        self.set_stats.apply(increments);
    }

    #[must_use]
    pub fn is_on_bench(&self, player: PlayerId) -> bool {
        self.bench.iter().any(|&p| p == player)
    }
}
