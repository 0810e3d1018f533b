//! Error types for store operations.

use thiserror::Error;

/// Errors surfaced by [`Store::dispatch`](crate::Store::dispatch).
///
/// A rejected action never leaves partial state behind: the store keeps the
/// previous state and skips notification entirely.
///
/// Domain-level failures (a network fetch that came back with an error, a
/// database write that did not apply) are not dispatch errors. They are
/// action variants carrying the failure information, fed through the normal
/// dispatch path and reduced into state like any other event.
#[derive(Debug, Error)]
pub enum StoreError<E>
where
    E: std::error::Error + 'static,
{
    /// The reducer rejected the action; state was left unchanged.
    #[error("reducer rejected action: {0}")]
    Rejected(#[source] E),
}

impl<E> StoreError<E>
where
    E: std::error::Error + 'static,
{
    /// Recover the underlying reducer error.
    pub fn into_reducer_error(self) -> E {
        match self {
            StoreError::Rejected(err) => err,
        }
    }
}
