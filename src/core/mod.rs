//! Core match types: players, teams, ids, configuration, scoreboard, errors.
//!
//! These are the leaf building blocks every other module depends on.

pub mod player;
pub mod team;
pub mod rng;
pub mod config;
pub mod state;
pub mod error;

pub use player::{Player, PlayerEntry, PlayerId, Roster};
pub use team::Team;
pub use rng::{IdRng, MatchId};
pub use config::MatchConfig;
pub use state::{MatchPhase, MatchState};
pub use error::{MatchError, MatchResult};
