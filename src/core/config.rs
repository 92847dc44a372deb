//! Match configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Sets a team must win to take the match (default: 3, best of five).
    pub sets_to_win: u8,

    /// Minimum roster size accepted at match start (default: 6).
    pub min_roster_size: usize,

    /// Seed for player and match id generation.
    /// Same seed and match name produce the same ids.
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            sets_to_win: 3,
            min_roster_size: 6,
            seed: 42,
        }
    }
}

impl MatchConfig {
    /// Set the number of sets needed to win.
    #[must_use]
    pub fn with_sets_to_win(mut self, sets: u8) -> Self {
        assert!(sets > 0, "A match needs at least one set");
        self.sets_to_win = sets;
        self
    }

    /// Set the minimum roster size.
    #[must_use]
    pub fn with_min_roster_size(mut self, size: usize) -> Self {
        self.min_roster_size = size;
        self
    }

    /// Set the id generation seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MatchConfig::default();
        assert_eq!(config.sets_to_win, 3);
        assert_eq!(config.min_roster_size, 6);
    }

    #[test]
    fn test_builder_methods() {
        let config = MatchConfig::default().with_sets_to_win(2).with_seed(9);
        assert_eq!(config.sets_to_win, 2);
        assert_eq!(config.seed, 9);
    }

    #[test]
    #[should_panic(expected = "at least one set")]
    fn test_zero_sets_rejected() {
        let _ = MatchConfig::default().with_sets_to_win(0);
    }

    #[test]
    fn test_config_serialization() {
        let config = MatchConfig::default().with_min_roster_size(8);
        let json = serde_json::to_string(&config).unwrap();
        let restored: MatchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
