//! Match engine: live state, point engine, undo history and the public
//! operation surface.
//!
//! ## Architecture
//!
//! - `LiveState` holds every field an undo snapshot captures
//! - `point` extends `LiveState` with `award_point` and `rotate`
//! - `History` is the snapshot stack
//! - `MatchEngine` validates each call, checkpoints, then mutates

mod live;
mod point;
mod history;
mod match_engine;

pub use live::{LiveState, PendingAction, PointLog};
pub use point::PointOutcome;
pub use history::History;
pub use match_engine::{MatchEngine, StatScope};
