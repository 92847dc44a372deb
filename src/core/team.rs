//! The two sides of the net.

use serde::{Deserialize, Serialize};

/// A side of the match. The engine tracks one team (`Home`) in detail and
/// the other only as a score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Home,
    Opponent,
}

impl Team {
    /// The other side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Team::Home => Team::Opponent,
            Team::Opponent => Team::Home,
        }
    }

    /// Point log prefix: `H` or `O`.
    #[must_use]
    pub const fn log_prefix(self) -> &'static str {
        match self {
            Team::Home => "H",
            Team::Opponent => "O",
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::Home => write!(f, "home"),
            Team::Opponent => write!(f, "opponent"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_other() {
        assert_eq!(Team::Home.other(), Team::Opponent);
        assert_eq!(Team::Opponent.other(), Team::Home);
    }

    #[test]
    fn test_team_serialization() {
        assert_eq!(serde_json::to_string(&Team::Home).unwrap(), "\"home\"");
        let team: Team = serde_json::from_str("\"opponent\"").unwrap();
        assert_eq!(team, Team::Opponent);
    }
}
