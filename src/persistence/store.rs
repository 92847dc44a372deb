//! Persistence port and an in-memory implementation.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::core::MatchId;

use super::document::MatchDocument;

/// Errors from saving or loading a match.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("Failed to encode match document: {0}")]
    Encode(String),

    #[error("Failed to decode match document: {0}")]
    Decode(String),

    #[error("No saved match with id {0}")]
    NotFound(MatchId),

    /// Nothing to save before a match has started.
    #[error("No match in progress")]
    NoMatch,
}

/// Storage collaborator for match documents.
///
/// Implementations own all I/O; the engine only hands over and receives
/// whole documents.
pub trait PersistencePort {
    /// Store a document, replacing any previous save with the same id.
    fn save(&mut self, document: &MatchDocument) -> Result<(), PersistenceError>;

    /// Fetch a document by match id.
    fn load(&self, match_id: &MatchId) -> Result<MatchDocument, PersistenceError>;
}

/// Keeps bincode-encoded documents in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    documents: FxHashMap<MatchId, Vec<u8>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Saved match ids, sorted.
    #[must_use]
    pub fn match_ids(&self) -> Vec<MatchId> {
        let mut ids: Vec<_> = self.documents.keys().cloned().collect();
        ids.sort();
        ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl PersistencePort for MemoryStore {
    fn save(&mut self, document: &MatchDocument) -> Result<(), PersistenceError> {
        let bytes = document.to_bytes()?;
        self.documents.insert(document.match_id.clone(), bytes);
        Ok(())
    }

    fn load(&self, match_id: &MatchId) -> Result<MatchDocument, PersistenceError> {
        let bytes = self
            .documents
            .get(match_id)
            .ok_or_else(|| PersistenceError::NotFound(match_id.clone()))?;
        MatchDocument::from_bytes(bytes)
    }
}
