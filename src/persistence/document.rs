//! Serializable match document.
//!
//! A full picture of a match at rest: roster, lineup, bench, both stat
//! scopes, rotation table, point log and substitution groups. Groups are
//! stored as plain `(root, members)` id lists and rebuilt into the ledger on
//! load. Undo history is not stored; a loaded match starts with none.

use serde::{Deserialize, Serialize};

use crate::core::{MatchConfig, MatchId, MatchPhase, MatchState, PlayerId, Roster};
use crate::engine::{LiveState, MatchEngine, PendingAction, StatScope};
use crate::lineup::Lineup;
use crate::stats::{RotationScores, StatLine, StatRecord};
use crate::subs::SubstitutionLedger;

use super::store::{PersistenceError, PersistencePort};

/// A saved match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDocument {
    pub match_id: MatchId,
    pub match_name: String,
    pub phase: MatchPhase,
    pub game_state: MatchState,
    pub roster: Roster,

    /// Slots, libero and setter.
    pub lineup: Lineup,
    pub bench: Vec<PlayerId>,

    /// Most recent first.
    pub point_log: Vec<String>,

    /// Match-cumulative stats.
    pub player_stats: Vec<(PlayerId, StatLine)>,
    pub set_stats: Vec<(PlayerId, StatLine)>,
    pub rotation_scores: RotationScores,

    /// `(root, members)` per substitution group.
    pub sub_groups: Vec<(PlayerId, Vec<PlayerId>)>,

    #[serde(default)]
    pub pending: Option<PendingAction>,
}

impl MatchDocument {
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        serde_json::to_string_pretty(self).map_err(|e| PersistenceError::Encode(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        serde_json::from_str(json).map_err(|e| PersistenceError::Decode(e.to_string()))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistenceError> {
        bincode::serialize(self).map_err(|e| PersistenceError::Encode(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistenceError> {
        bincode::deserialize(bytes).map_err(|e| PersistenceError::Decode(e.to_string()))
    }

    /// Check that the document describes a reachable match state.
    ///
    /// The rotation must be 1-6, every referenced player must be on the
    /// roster, and no player may be both on court and on the bench.
    pub fn validate(&self) -> Result<(), PersistenceError> {
        let invalid = |msg: String| Err(PersistenceError::Decode(msg));

        if !(1..=6).contains(&self.game_state.rotation) {
            return invalid(format!("rotation {} is outside 1-6", self.game_state.rotation));
        }

        let court = self.lineup.occupants().map(|(_, p)| p);
        let staff = self.lineup.libero().into_iter().chain(self.lineup.setter());
        let stats = self
            .player_stats
            .iter()
            .chain(&self.set_stats)
            .map(|(p, _)| *p);
        let groups = self
            .sub_groups
            .iter()
            .flat_map(|(root, members)| std::iter::once(*root).chain(members.iter().copied()));
        let pending = self.pending.map(|PendingAction::AssistFor { attacker }| attacker);

        let mut referenced = court
            .chain(staff)
            .chain(self.bench.iter().copied())
            .chain(stats)
            .chain(groups)
            .chain(pending);
        if let Some(stranger) = referenced.find(|&p| !self.roster.contains(p)) {
            return invalid(format!("{} is not on the roster", stranger));
        }

        if let Some(both) = self.bench.iter().find(|&&p| self.lineup.is_on_court(p)) {
            return invalid(format!("{} is both on court and on the bench", both));
        }
        Ok(())
    }
}

impl MatchEngine {
    /// Capture the match as a document. `None` before `start_match`.
    #[must_use]
    pub fn to_document(&self) -> Option<MatchDocument> {
        let match_id = self.match_id()?.clone();
        let live = self.live();
        Some(MatchDocument {
            match_id,
            match_name: self.match_name().to_string(),
            phase: self.phase(),
            game_state: live.board,
            roster: self.roster().clone(),
            lineup: live.lineup.clone(),
            bench: live.bench.iter().copied().collect(),
            point_log: live.point_log.iter().map(str::to_string).collect(),
            player_stats: self.stats(StatScope::Match).entries(),
            set_stats: self.stats(StatScope::Set).entries(),
            rotation_scores: live.rotation_scores,
            sub_groups: live.ledger.groups(),
            pending: live.pending,
        })
    }

    /// Rebuild an engine from a document, with empty undo history.
    ///
    /// The document is validated first; an inconsistent one is rejected
    /// with `PersistenceError::Decode`.
    pub fn from_document(
        document: MatchDocument,
        config: MatchConfig,
    ) -> Result<Self, PersistenceError> {
        document.validate()?;
        let live = LiveState {
            board: document.game_state,
            lineup: document.lineup,
            match_stats: StatRecord::from_entries(document.player_stats),
            set_stats: StatRecord::from_entries(document.set_stats),
            point_log: document.point_log.into(),
            bench: document.bench.into_iter().collect(),
            ledger: SubstitutionLedger::from_groups(document.sub_groups),
            rotation_scores: document.rotation_scores,
            pending: document.pending,
        };
        Ok(MatchEngine::from_parts(
            config,
            document.phase,
            document.match_id,
            document.match_name,
            document.roster,
            live,
        ))
    }

    /// Save the current match through a persistence port.
    pub fn save(&self, port: &mut impl PersistencePort) -> Result<(), PersistenceError> {
        let document = self.to_document().ok_or(PersistenceError::NoMatch)?;
        port.save(&document)?;
        log::info!("match {} saved", document.match_id);
        Ok(())
    }

    /// Load a match through a persistence port.
    pub fn load(
        port: &impl PersistencePort,
        match_id: &MatchId,
        config: MatchConfig,
    ) -> Result<Self, PersistenceError> {
        let document = port.load(match_id)?;
        let engine = Self::from_document(document, config).map_err(|err| {
            log::warn!("match {} rejected on load: {}", match_id, err);
            err
        })?;
        log::info!("match {} loaded", match_id);
        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerEntry;

    fn started() -> MatchEngine {
        let mut engine = MatchEngine::new(MatchConfig::default());
        let entries = (1..=6).map(|n| PlayerEntry::new(n, format!("P{}", n))).collect();
        engine.start_match(entries, "doc").unwrap();
        engine
    }

    #[test]
    fn test_no_document_before_match() {
        let engine = MatchEngine::new(MatchConfig::default());
        assert!(engine.to_document().is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let document = started().to_document().unwrap();
        let json = document.to_json().unwrap();
        assert!(json.contains("\"match_name\": \"doc\""));

        let restored = MatchDocument::from_json(&json).unwrap();
        assert_eq!(restored, document);
    }

    #[test]
    fn test_bytes_round_trip() {
        let document = started().to_document().unwrap();
        let restored = MatchDocument::from_bytes(&document.to_bytes().unwrap()).unwrap();
        assert_eq!(restored, document);
    }

    #[test]
    fn test_fresh_document_is_valid() {
        assert_eq!(started().to_document().unwrap().validate(), Ok(()));
    }

    #[test]
    fn test_unknown_player_is_invalid() {
        let mut document = started().to_document().unwrap();
        document.bench.push(PlayerId(3));

        assert!(matches!(document.validate(), Err(PersistenceError::Decode(_))));
    }

    #[test]
    fn test_bad_json_is_decode_error() {
        assert!(matches!(
            MatchDocument::from_json("{"),
            Err(PersistenceError::Decode(_))
        ));
    }
}
