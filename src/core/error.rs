//! Error types for match operations.
//!
//! Every public engine operation returns `MatchResult`. A rejected
//! operation leaves the match exactly as it was, history included.

use thiserror::Error;

use super::player::PlayerId;
use super::state::MatchPhase;
use crate::lineup::Slot;

/// Errors returned by match engine operations.
///
/// # Examples
///
/// ```rust
/// use volley_stats::MatchError;
///
/// let err = MatchError::InsufficientRoster { required: 6, supplied: 4 };
/// assert_eq!(err.to_string(), "Roster needs at least 6 players, got 4");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// A serving-only stat was recorded while home was not serving.
    #[error("Home team is not serving")]
    InvalidServeContext,

    /// A reception error was recorded while home was serving.
    #[error("Home team is serving and cannot commit a reception error")]
    InvalidReceptionContext,

    /// A block was credited to a player in the back row.
    #[error("{player} is in back-row slot {slot} and cannot block")]
    IllegalBlockPosition { player: PlayerId, slot: Slot },

    /// The incoming player belongs to a different substitution group.
    #[error("{player_in} cannot replace {player_out}: different substitution group")]
    IllegalCrossGroup {
        player_out: PlayerId,
        player_in: PlayerId,
    },

    /// Fewer players than the configured minimum at match start.
    #[error("Roster needs at least {required} players, got {supplied}")]
    InsufficientRoster { required: usize, supplied: usize },

    /// The operation needs a player in a slot that is empty.
    #[error("Lineup slot {0} is empty")]
    EmptySlot(Slot),

    /// The player id is not on the roster.
    #[error("{0} is not on the roster")]
    UnknownPlayer(PlayerId),

    /// A player stat was recorded without naming a player.
    #[error("{0} must be credited to a player")]
    MissingPlayer(String),

    /// Two roster entries share a shirt number.
    #[error("Shirt number {0} is used more than once")]
    DuplicateNumber(u32),

    /// The player already holds a court position (or is the libero).
    #[error("{0} is already on court")]
    AlreadyOnCourt(PlayerId),

    /// The player must be on court for this operation.
    #[error("{0} is not on court")]
    NotOnCourt(PlayerId),

    /// The named outgoing player is not in the given slot.
    #[error("{player} is not in slot {slot}")]
    PlayerNotInSlot { player: PlayerId, slot: Slot },

    /// Slot numbers run from 1 to 6.
    #[error("Invalid lineup slot {0}")]
    InvalidSlot(u8),

    /// The operation is not legal in the current phase.
    #[error("Operation requires phase {expected:?}, match is in {actual:?}")]
    WrongPhase {
        expected: MatchPhase,
        actual: MatchPhase,
    },

    /// The match is over.
    #[error("Match is finished")]
    MatchFinished,

    /// A KWDA kill is waiting for its assist.
    #[error("Waiting for the assist on a KWDA kill by {0}")]
    AwaitingAssist(PlayerId),

    /// An assist was recorded with no KWDA kill pending.
    #[error("No KWDA kill is waiting for an assist")]
    NoPendingAssist,

    /// The KWDA assist was given to the attacker who made the kill.
    #[error("{0} cannot assist their own KWDA kill")]
    SelfAssist(PlayerId),
}

/// Result alias for match operations.
pub type MatchResult<T> = Result<T, MatchError>;
