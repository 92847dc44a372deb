//! Undo history.
//!
//! A stack of `LiveState` snapshots. Each snapshot is pushed immediately
//! before a mutating call, and popping one restores the whole live state.
//! The stack is unbounded and is cleared at every set boundary.

use super::live::LiveState;

#[derive(Clone, Debug, Default)]
pub struct History {
    snapshots: Vec<LiveState>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a snapshot of `live`.
    pub fn snapshot(&mut self, live: &LiveState) {
        self.snapshots.push(live.clone());
        log::trace!("snapshot pushed, depth {}", self.snapshots.len());
    }

    /// Pop the most recent snapshot.
    pub fn pop(&mut self) -> Option<LiveState> {
        let snapshot = self.snapshots.pop();
        if snapshot.is_some() {
            log::trace!("snapshot popped, depth {}", self.snapshots.len());
        }
        snapshot
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifo() {
        let mut history = History::new();
        let mut live = LiveState::new();

        history.snapshot(&live);
        live.board.home_score = 1;
        history.snapshot(&live);
        live.board.home_score = 2;

        assert_eq!(history.len(), 2);
        assert_eq!(history.pop().map(|s| s.board.home_score), Some(1));
        assert_eq!(history.pop().map(|s| s.board.home_score), Some(0));
        assert!(history.pop().is_none());
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        history.snapshot(&LiveState::new());
        history.clear();
        assert!(history.is_empty());
    }
}
