//! Substitution ledger.
//!
//! Each starting player seeds a group keyed by their own id. A player who
//! enters the court joins the group of the player they replace, and may
//! from then on only swap with members of that group.
//!
//! Membership is stored as `member -> root` where the root is the starter's
//! id, so two players share a group exactly when they map to the same root.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::core::{MatchError, MatchResult, PlayerId};

/// Tracks which players may legally interchange during a set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionLedger {
    roots: OrdMap<PlayerId, PlayerId>,
}

impl SubstitutionLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one singleton group per starter, discarding any previous groups.
    pub fn record_groups_at_set_start(&mut self, starters: impl IntoIterator<Item = PlayerId>) {
        self.roots = starters.into_iter().map(|p| (p, p)).collect();
    }

    /// Root of the group `player` belongs to.
    #[must_use]
    pub fn group_of(&self, player: PlayerId) -> Option<PlayerId> {
        self.roots.get(&player).copied()
    }

    /// A player who has never been in a group.
    #[must_use]
    pub fn is_free_agent(&self, player: PlayerId) -> bool {
        !self.roots.contains_key(&player)
    }

    /// Check that `player_in` may replace `player_out`.
    ///
    /// Legal when the incoming player is a free agent or already shares the
    /// outgoing player's group.
    pub fn validate(&self, player_out: PlayerId, player_in: PlayerId) -> MatchResult<()> {
        match self.group_of(player_in) {
            None => Ok(()),
            Some(root) if Some(root) == self.group_of(player_out) => Ok(()),
            Some(_) => Err(MatchError::IllegalCrossGroup {
                player_out,
                player_in,
            }),
        }
    }

    /// Record a substitution that has passed [`validate`](Self::validate).
    ///
    /// A free-agent incoming player joins the outgoing player's group. If the
    /// outgoing player was never grouped, they become the root.
    pub fn apply(&mut self, player_out: PlayerId, player_in: PlayerId) {
        if !self.is_free_agent(player_in) {
            return;
        }
        let root = match self.group_of(player_out) {
            Some(root) => root,
            None => {
                self.roots.insert(player_out, player_out);
                player_out
            }
        };
        self.roots.insert(player_in, root);
    }

    /// Members of the group rooted at `root`, in id order.
    #[must_use]
    pub fn members(&self, root: PlayerId) -> Vec<PlayerId> {
        self.roots
            .iter()
            .filter(|(_, r)| **r == root)
            .map(|(p, _)| *p)
            .collect()
    }

    /// All groups as `(root, members)` lists, ordered by root.
    #[must_use]
    pub fn groups(&self) -> Vec<(PlayerId, Vec<PlayerId>)> {
        let mut roots: Vec<PlayerId> = self.roots.values().copied().collect();
        roots.sort_unstable();
        roots.dedup();
        roots.into_iter().map(|r| (r, self.members(r))).collect()
    }

    /// Rebuild a ledger from `(root, members)` lists.
    ///
    /// A player listed under several roots keeps the first.
    #[must_use]
    pub fn from_groups(groups: impl IntoIterator<Item = (PlayerId, Vec<PlayerId>)>) -> Self {
        let mut roots = OrdMap::new();
        for (root, members) in groups {
            for player in std::iter::once(root).chain(members) {
                if !roots.contains_key(&player) {
                    roots.insert(player, root);
                }
            }
        }
        Self { roots }
    }

    /// Drop all groups.
    pub fn clear(&mut self) {
        self.roots.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
