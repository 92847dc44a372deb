//! Match documents and the persistence port.
//!
//! The engine owns no storage. Callers plug in a `PersistencePort`;
//! `MemoryStore` is provided for tests and single-process use.

mod document;
mod store;

pub use document::MatchDocument;
pub use store::{MemoryStore, PersistenceError, PersistencePort};
