//! Points won and lost in each rotation.

use serde::{Deserialize, Serialize};

use crate::core::Team;

/// Points scored by each side while one rotation was active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationScore {
    pub home: u32,
    pub opponent: u32,
}

impl RotationScore {
    /// Home points minus opponent points.
    #[must_use]
    pub const fn differential(&self) -> i64 {
        self.home as i64 - self.opponent as i64
    }
}

/// Rotation score table for the current set, rotations 1..=6.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationScores([RotationScore; 6]);

impl RotationScores {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Row for a rotation number (1..=6). Out-of-range rotations read as
    /// an empty row.
    #[must_use]
    pub fn get(&self, rotation: u8) -> RotationScore {
        Self::index(rotation)
            .map(|i| self.0[i])
            .unwrap_or_default()
    }

    /// Credit a point to `team` in `rotation`. Returns `false`, crediting
    /// nothing, if `rotation` is outside 1..=6.
    pub fn credit(&mut self, rotation: u8, team: Team) -> bool {
        let Some(row) = Self::index(rotation).map(|i| &mut self.0[i]) else {
            return false;
        };
        match team {
            Team::Home => row.home += 1,
            Team::Opponent => row.opponent += 1,
        }
        true
    }

    /// `(rotation, row)` pairs in rotation order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, RotationScore)> + '_ {
        self.0.iter().enumerate().map(|(i, r)| (i as u8 + 1, *r))
    }

    fn index(rotation: u8) -> Option<usize> {
        (1..=6).contains(&rotation).then(|| usize::from(rotation - 1))
    }
}
