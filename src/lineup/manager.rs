//! On-court lineup: six rotation slots, the libero and the designated setter.

use serde::{Deserialize, Serialize};

use super::slot::Slot;
use crate::core::PlayerId;

/// The six serve-rotation slots plus libero and setter.
///
/// Rotation moves whoever currently holds a slot, libero included.
///
/// ## Usage
///
/// ```
/// use volley_stats::lineup::{Lineup, Slot};
/// use volley_stats::core::PlayerId;
///
/// let mut lineup = Lineup::new();
/// for slot in Slot::ALL {
///     lineup.set_slot(slot, Some(PlayerId(slot.number() as u64)));
/// }
///
/// lineup.rotate();
/// assert_eq!(lineup.server(), Some(PlayerId(2)));
/// assert_eq!(lineup.get(Slot::SIX), Some(PlayerId(1)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineup {
    slots: [Option<PlayerId>; 6],
    libero: Option<PlayerId>,
    setter: Option<PlayerId>,
}

impl Lineup {
    /// Create an empty lineup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Occupant of a slot.
    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<PlayerId> {
        self.slots[slot.index()]
    }

    /// Assign a slot directly. No substitution bookkeeping.
    pub fn set_slot(&mut self, slot: Slot, player: Option<PlayerId>) {
        self.slots[slot.index()] = player;
    }

    /// The player serving (slot 1).
    #[must_use]
    pub fn server(&self) -> Option<PlayerId> {
        self.get(Slot::ONE)
    }

    /// Slot currently held by `player`.
    #[must_use]
    pub fn slot_of(&self, player: PlayerId) -> Option<Slot> {
        Slot::ALL.into_iter().find(|&s| self.get(s) == Some(player))
    }

    /// Whether `player` holds any slot.
    #[must_use]
    pub fn is_on_court(&self, player: PlayerId) -> bool {
        self.slot_of(player).is_some()
    }

    /// First empty slot in serve order.
    #[must_use]
    pub fn first_empty(&self) -> Option<Slot> {
        Slot::ALL.into_iter().find(|&s| self.get(s).is_none())
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.first_empty().is_none()
    }

    /// Occupied slots in serve order.
    pub fn occupants(&self) -> impl Iterator<Item = (Slot, PlayerId)> + '_ {
        Slot::ALL
            .into_iter()
            .filter_map(move |s| self.get(s).map(|p| (s, p)))
    }

    /// Rotate one position: slot *i* takes the occupant of slot *i + 1*,
    /// slot 6 takes the old server.
    pub fn rotate(&mut self) {
        self.slots.rotate_left(1);
    }

    #[must_use]
    pub fn libero(&self) -> Option<PlayerId> {
        self.libero
    }

    pub fn set_libero(&mut self, player: Option<PlayerId>) {
        self.libero = player;
    }

    #[must_use]
    pub fn setter(&self) -> Option<PlayerId> {
        self.setter
    }

    pub fn set_setter(&mut self, player: Option<PlayerId>) {
        self.setter = player;
    }

    /// Empty every slot and drop libero and setter.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
