//! Stat kinds and scorer actions.
//!
//! `StatKind` is a per-player tally. `Action` is what the scorer presses:
//! a player stat, the KWDA kill, or one of the two team-level outcomes.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::Team;

/// A per-player stat counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatKind {
    #[serde(rename = "Serve Attempt")]
    ServeAttempt,
    #[serde(rename = "Ace")]
    Ace,
    #[serde(rename = "Serve Error")]
    ServeError,
    #[serde(rename = "Hit Attempt")]
    HitAttempt,
    #[serde(rename = "Kill")]
    Kill,
    #[serde(rename = "Hit Error")]
    HitError,
    #[serde(rename = "Set Attempt")]
    SetAttempt,
    #[serde(rename = "Assist")]
    Assist,
    #[serde(rename = "Set Error")]
    SetError,
    #[serde(rename = "Block")]
    Block,
    #[serde(rename = "Block Error")]
    BlockError,
    #[serde(rename = "Dig")]
    Dig,
    #[serde(rename = "RE")]
    ReceptionError,
}

impl StatKind {
    /// Number of stat kinds.
    pub const COUNT: usize = 13;

    /// All stats in stat-sheet column order.
    pub const ALL: [StatKind; Self::COUNT] = [
        StatKind::ServeAttempt,
        StatKind::Ace,
        StatKind::ServeError,
        StatKind::HitAttempt,
        StatKind::Kill,
        StatKind::HitError,
        StatKind::SetAttempt,
        StatKind::Assist,
        StatKind::SetError,
        StatKind::Block,
        StatKind::BlockError,
        StatKind::Dig,
        StatKind::ReceptionError,
    ];

    /// Column index in a `StatLine`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display name as shown on the stat sheet.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            StatKind::ServeAttempt => "Serve Attempt",
            StatKind::Ace => "Ace",
            StatKind::ServeError => "Serve Error",
            StatKind::HitAttempt => "Hit Attempt",
            StatKind::Kill => "Kill",
            StatKind::HitError => "Hit Error",
            StatKind::SetAttempt => "Set Attempt",
            StatKind::Assist => "Assist",
            StatKind::SetError => "Set Error",
            StatKind::Block => "Block",
            StatKind::BlockError => "Block Error",
            StatKind::Dig => "Dig",
            StatKind::ReceptionError => "RE",
        }
    }

    /// Team that wins the rally when this stat is recorded, if any.
    #[must_use]
    pub const fn point_winner(self) -> Option<Team> {
        match self {
            StatKind::Ace | StatKind::Kill | StatKind::Block => Some(Team::Home),
            StatKind::ServeError
            | StatKind::HitError
            | StatKind::SetError
            | StatKind::ReceptionError
            | StatKind::BlockError => Some(Team::Opponent),
            StatKind::ServeAttempt
            | StatKind::HitAttempt
            | StatKind::SetAttempt
            | StatKind::Assist
            | StatKind::Dig => None,
        }
    }

    /// Stats that only the serving team can produce.
    #[must_use]
    pub const fn requires_home_serve(self) -> bool {
        matches!(self, StatKind::Ace | StatKind::ServeError)
    }
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognised stat or action name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown stat: {0}")]
pub struct UnknownStat(pub String);

impl FromStr for StatKind {
    type Err = UnknownStat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| UnknownStat(s.to_string()))
    }
}

/// A scorer input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// A per-player stat.
    Stat(StatKind),
    /// Kill whose assist is assigned in a second step.
    Kwda,
    /// Opponent faulted: home point, no player credited.
    OpponentError,
    /// Opponent won the rally: no player credited.
    OpponentPoint,
}

impl Action {
    /// Team that wins the rally, if this action ends one.
    #[must_use]
    pub const fn point_winner(self) -> Option<Team> {
        match self {
            Action::Stat(kind) => kind.point_winner(),
            Action::Kwda | Action::OpponentError => Some(Team::Home),
            Action::OpponentPoint => Some(Team::Opponent),
        }
    }

    /// Home point reasons that break the opponent's serve.
    ///
    /// On these, the serve attempt is credited to the player who is about to
    /// rotate into slot 1.
    #[must_use]
    pub const fn is_sideout_cause(self) -> bool {
        matches!(
            self,
            Action::Stat(StatKind::Kill)
                | Action::Kwda
                | Action::Stat(StatKind::Block)
                | Action::OpponentError
        )
    }

    /// Whether a player must be named.
    #[must_use]
    pub const fn needs_player(self) -> bool {
        match self {
            Action::Stat(kind) => !kind.requires_home_serve(),
            Action::Kwda => true,
            Action::OpponentError | Action::OpponentPoint => false,
        }
    }

    /// Button label.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Action::Stat(kind) => kind.name(),
            Action::Kwda => "KWDA",
            Action::OpponentError => "Opponent Error",
            Action::OpponentPoint => "Opponent Point",
        }
    }
}

impl From<StatKind> for Action {
    fn from(kind: StatKind) -> Self {
        Action::Stat(kind)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = UnknownStat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "KWDA" => Ok(Action::Kwda),
            "Opponent Error" => Ok(Action::OpponentError),
            "Opponent Point" => Ok(Action::OpponentPoint),
            other => other.parse().map(Action::Stat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_column_order() {
        for (i, kind) in StatKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Hit Error".parse::<StatKind>(), Ok(StatKind::HitError));
        assert_eq!("RE".parse::<StatKind>(), Ok(StatKind::ReceptionError));
        assert_eq!("KWDA".parse::<Action>(), Ok(Action::Kwda));
        assert_eq!("Dig".parse::<Action>(), Ok(Action::Stat(StatKind::Dig)));
        assert!("Spike".parse::<Action>().is_err());
    }

    #[test]
    fn test_point_winners() {
        assert_eq!(StatKind::Block.point_winner(), Some(Team::Home));
        assert_eq!(StatKind::BlockError.point_winner(), Some(Team::Opponent));
        assert_eq!(StatKind::Dig.point_winner(), None);
        assert_eq!(Action::OpponentError.point_winner(), Some(Team::Home));
    }

    #[test]
    fn test_sideout_causes() {
        assert!(Action::Stat(StatKind::Kill).is_sideout_cause());
        assert!(Action::OpponentError.is_sideout_cause());
        assert!(!Action::Stat(StatKind::Ace).is_sideout_cause());
        assert!(!Action::OpponentPoint.is_sideout_cause());
    }

    #[test]
    fn test_serde_uses_display_names() {
        assert_eq!(serde_json::to_string(&StatKind::ServeAttempt).unwrap(), "\"Serve Attempt\"");
        let kind: StatKind = serde_json::from_str("\"RE\"").unwrap();
        assert_eq!(kind, StatKind::ReceptionError);
    }
}
