//! # volley-stats
//!
//! A deterministic volleyball match engine for one tracked team.
//!
//! ## Design Principles
//!
//! 1. **Pure State Transitions**: Every scorer action either applies in full
//!    or is rejected with a typed error and no change.
//!
//! 2. **Exact Undo**: A snapshot of the live state is pushed before every
//!    in-set mutation. Snapshots use `im` persistent collections, so taking
//!    one is O(1).
//!
//! 3. **Rules As Data**: Compound stats (a kill implying a hit attempt and a
//!    setter assist) come from a declarative rule table.
//!
//! ## Modules
//!
//! - `core`: Player ids, roster, teams, configuration, scoreboard, errors
//! - `lineup`: Rotation slots, libero, setter
//! - `subs`: Substitution group ledger
//! - `stats`: Stat kinds, scorer actions, derivation rules, stat records
//! - `engine`: Point engine, undo history, `MatchEngine`
//! - `persistence`: Match documents and the storage port

pub mod core;
pub mod lineup;
pub mod subs;
pub mod stats;
pub mod engine;
pub mod persistence;

// Re-export commonly used types
pub use crate::core::{
    IdRng, MatchConfig, MatchError, MatchId, MatchPhase, MatchResult, MatchState, Player,
    PlayerEntry, PlayerId, Roster, Team,
};

pub use crate::lineup::{Lineup, Slot};

pub use crate::subs::SubstitutionLedger;

pub use crate::stats::{
    Action, HittingPercentage, RotationScore, RotationScores, StatKind, StatLine, StatRecord,
};

pub use crate::engine::{History, LiveState, MatchEngine, PendingAction, PointLog, PointOutcome, StatScope};

pub use crate::persistence::{MatchDocument, MemoryStore, PersistenceError, PersistencePort};
