//! Player identification and the match roster.
//!
//! ## PlayerId
//!
//! Opaque token minted when a player enters the roster. The engine never
//! interprets the value; it only compares and orders ids.
//!
//! ## Roster
//!
//! Ordered, immutable list of players for the match, with O(1) lookup by id.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Opaque player identifier, unique within a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl PlayerId {
    /// Create a player ID from a raw token.
    #[must_use]
    pub const fn new(token: u64) -> Self {
        Self(token)
    }

    /// Get the raw token.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player({:016x})", self.0)
    }
}

/// A player as entered by the scorer, before an id is assigned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    /// Shirt number.
    pub number: u32,
    /// Display name.
    pub name: String,
}

impl PlayerEntry {
    pub fn new(number: u32, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
        }
    }
}

/// A rostered player. Immutable for the whole match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub number: u32,
    pub name: String,
}

impl Player {
    /// Short label used in the point log: `#7 Alice`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("#{} {}", self.number, self.name)
    }
}

/// Ordered roster with id lookup.
///
/// The lookup index is rebuilt on deserialization, so only the player list
/// goes over the wire.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Player>", into = "Vec<Player>")]
pub struct Roster {
    players: Vec<Player>,
    index: FxHashMap<PlayerId, usize>,
}

impl Roster {
    /// Build a roster from an ordered player list.
    #[must_use]
    pub fn new(players: Vec<Player>) -> Self {
        let index = players
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id, i))
            .collect();
        Self { players, index }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Look up a player by id.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.index.get(&id).map(|&i| &self.players[i])
    }

    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.index.contains_key(&id)
    }

    /// Players in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Player ids in roster order.
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().map(|p| p.id)
    }

    /// The player wearing `number`, if any.
    #[must_use]
    pub fn by_number(&self, number: u32) -> Option<&Player> {
        self.players.iter().find(|p| p.number == number)
    }
}

impl PartialEq for Roster {
    fn eq(&self, other: &Self) -> bool {
        self.players == other.players
    }
}

impl Eq for Roster {}

impl From<Vec<Player>> for Roster {
    fn from(players: Vec<Player>) -> Self {
        Self::new(players)
    }
}

impl From<Roster> for Vec<Player> {
    fn from(roster: Roster) -> Self {
        roster.players
    }
}
