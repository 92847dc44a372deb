//! Stat engine data: stat kinds, scorer actions, derivation rules, records.
//!
//! - `StatKind`: per-player counters in stat-sheet order
//! - `Action`: every scorer input, including team-level outcomes
//! - `rules`: the declarative table of derived increments
//! - `StatRecord`: `PlayerId -> StatLine` for one scope (set or match)
//! - `RotationScores`: points per rotation for the current set

mod kind;
pub mod rules;
mod record;
mod rotation;

pub use kind::{Action, StatKind, UnknownStat};
pub use rules::{derive, DerivationRule, Increment, Increments, RULES};
pub use record::{HittingPercentage, StatLine, StatRecord};
pub use rotation::{RotationScore, RotationScores};
