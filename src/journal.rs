//! Ordered record of dispatched actions.
//!
//! Because reducers are pure, an action journal plus the initial state is a
//! complete description of a session: replaying the journal reconstructs
//! the exact final state. That makes the journal the building block for
//! debugging (inspect what happened), bug reports (serialize and attach),
//! and crash recovery (replay on next launch).

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::reducer::{replay, Reducer};

/// An append-only, ordered log of actions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Journal<A> {
    entries: Vec<A>,
}

impl<A> Journal<A> {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an action to the log.
    pub fn record(&mut self, action: A) {
        self.entries.push(action);
    }

    /// Number of recorded actions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal holds no actions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The recorded actions, oldest first.
    pub fn actions(&self) -> &[A] {
        &self.entries
    }

    /// Drop all recorded actions.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Consume the journal, yielding the recorded actions.
    pub fn into_actions(self) -> Vec<A> {
        self.entries
    }
}

impl<A: Clone> Journal<A> {
    /// Reconstruct the state reached by dispatching every recorded action,
    /// in order, starting from `initial`.
    ///
    /// Stops at the first reducer error, mirroring a live dispatch
    /// sequence that was interrupted by a rejection.
    pub fn replay<R>(&self, initial: R::State) -> Result<R::State, R::Error>
    where
        R: Reducer<Action = A>,
    {
        replay::<R, _>(initial, self.entries.iter().cloned())
    }
}

impl<A: Serialize> Journal<A> {
    /// Serialize the recorded actions to a JSON array.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.entries)
    }
}

impl<A: DeserializeOwned> Journal<A> {
    /// Rebuild a journal from a JSON array produced by [`Journal::to_json`].
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Ok(Self {
            entries: serde_json::from_str(json)?,
        })
    }
}

impl<A> Extend<A> for Journal<A> {
    fn extend<I: IntoIterator<Item = A>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<A> FromIterator<A> for Journal<A> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        Self {
            entries: Vec::from_iter(iter),
        }
    }
}
