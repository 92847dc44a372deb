//! Serve-rotation slots.
//!
//! Slot 1 is the server (right back). Order around the court:
//!
//! ```text
//!   net
//!   4 3 2     front row
//!   5 6 1     back row
//! ```

use serde::{Deserialize, Serialize};

use crate::core::MatchError;

/// One of the six serve-rotation slots (1..=6).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Slot(u8);

impl Slot {
    pub const ONE: Slot = Slot(1);
    pub const TWO: Slot = Slot(2);
    pub const THREE: Slot = Slot(3);
    pub const FOUR: Slot = Slot(4);
    pub const FIVE: Slot = Slot(5);
    pub const SIX: Slot = Slot(6);

    /// All slots in serve order.
    pub const ALL: [Slot; 6] = [
        Slot::ONE,
        Slot::TWO,
        Slot::THREE,
        Slot::FOUR,
        Slot::FIVE,
        Slot::SIX,
    ];

    /// Slot for a 1-based number, if in range.
    #[must_use]
    pub const fn new(number: u8) -> Option<Self> {
        if number >= 1 && number <= 6 {
            Some(Self(number))
        } else {
            None
        }
    }

    /// 1-based slot number.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// 0-based array index.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Back-row slots (1, 5, 6) may not block.
    #[must_use]
    pub const fn is_back_row(self) -> bool {
        matches!(self.0, 1 | 5 | 6)
    }

    #[must_use]
    pub const fn is_front_row(self) -> bool {
        !self.is_back_row()
    }
}

impl TryFrom<u8> for Slot {
    type Error = MatchError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Slot::new(number).ok_or(MatchError::InvalidSlot(number))
    }
}

impl From<Slot> for u8 {
    fn from(slot: Slot) -> Self {
        slot.0
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
