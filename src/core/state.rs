//! Scoreboard state and match phase.
//!
//! ## MatchState
//!
//! The scoreboard: points, sets, serve, subs, set number and rotation.
//! Points, subs and serve reset at each set; set count and sets won persist.
//!
//! ## MatchPhase
//!
//! Where the match is in its lifecycle. Operations check the phase before
//! touching anything.

use serde::{Deserialize, Serialize};

use super::team::Team;

/// Lifecycle phase of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    /// No roster yet.
    #[default]
    PreMatch,
    /// Roster set, choosing lineup, libero and setter for the next set.
    LineupSetup,
    /// A set is in progress.
    Playing,
    /// A team has won the match.
    Finished,
}

/// Scoreboard state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub home_score: u32,
    pub opponent_score: u32,
    pub home_sets_won: u8,
    pub opponent_sets_won: u8,

    /// Team currently serving. `None` between sets.
    pub serving_team: Option<Team>,

    /// Substitutions made by the home team this set.
    pub home_subs: u32,

    /// Current set number (starts at 1).
    pub current_set: u32,

    /// Rotation number (1..=6). Advances by one on every home sideout.
    pub rotation: u8,

    /// Bumped by every successful mutating operation.
    pub revision: u64,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    /// Fresh scoreboard for set 1, rotation 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            home_score: 0,
            opponent_score: 0,
            home_sets_won: 0,
            opponent_sets_won: 0,
            serving_team: None,
            home_subs: 0,
            current_set: 1,
            rotation: 1,
            revision: 0,
        }
    }

    /// Points for a team in the current set.
    #[must_use]
    pub const fn score(&self, team: Team) -> u32 {
        match team {
            Team::Home => self.home_score,
            Team::Opponent => self.opponent_score,
        }
    }

    /// Sets won by a team.
    #[must_use]
    pub const fn sets_won(&self, team: Team) -> u8 {
        match team {
            Team::Home => self.home_sets_won,
            Team::Opponent => self.opponent_sets_won,
        }
    }

    /// Add one point and hand the serve to the scoring team.
    pub fn add_point(&mut self, team: Team) {
        match team {
            Team::Home => self.home_score += 1,
            Team::Opponent => self.opponent_score += 1,
        }
        self.serving_team = Some(team);
    }

    /// Advance the rotation number, wrapping 6 back to 1.
    pub fn advance_rotation(&mut self) {
        self.rotation = (self.rotation % 6) + 1;
    }

    /// Winner of the current set on points. Ties go to the opponent.
    #[must_use]
    pub const fn set_leader(&self) -> Team {
        if self.home_score > self.opponent_score {
            Team::Home
        } else {
            Team::Opponent
        }
    }

    /// Record a set win for `team`.
    pub fn add_set(&mut self, team: Team) {
        match team {
            Team::Home => self.home_sets_won += 1,
            Team::Opponent => self.opponent_sets_won += 1,
        }
    }

    /// Reset per-set fields for the next set.
    ///
    /// Scores, subs and serve are cleared, the rotation returns to 1 and the
    /// set number advances. Sets won persist.
    pub fn next_set(&mut self) {
        self.home_score = 0;
        self.opponent_score = 0;
        self.home_subs = 0;
        self.serving_team = None;
        self.rotation = 1;
        self.current_set += 1;
    }

    pub(crate) fn bump_revision(&mut self) {
        self.revision += 1;
    }
}
