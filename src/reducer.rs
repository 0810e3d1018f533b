//! Reducer trait and action replay.

use crate::action::Action;
use crate::state::State;

/// Reducer transforms state based on actions.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: identical `(state, action)` inputs always
/// yield the identical new state, with no side effects and no hidden
/// collaborators.
///
/// Reducers are total over their action type: an action the reducer does
/// not care about returns the input state unchanged. `reduce` is fallible
/// only for invariant violations — an action whose payload cannot be
/// applied to the current state. On error the store keeps the previous
/// state; there is never a partial transition. Reducers that cannot fail
/// use [`std::convert::Infallible`] as their error type.
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: State;

    /// The action type this reducer handles.
    type Action: Action;

    /// Error returned when an action would violate a state invariant.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Process an action and return the new state.
    fn reduce(state: Self::State, action: Self::Action) -> Result<Self::State, Self::Error>;
}

/// Fold an ordered sequence of actions over an initial state.
///
/// Because reducers are pure, the result depends only on the initial state
/// and the order of actions — the same sequence always reconstructs the
/// same final state. Stops at the first reducer error.
pub fn replay<R, I>(initial: R::State, actions: I) -> Result<R::State, R::Error>
where
    R: Reducer,
    I: IntoIterator<Item = R::Action>,
{
    let mut state = initial;
    for action in actions {
        state = R::reduce(state, action)?;
    }
    Ok(state)
}
