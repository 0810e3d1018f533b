//! Unidirectional, immutable-state data flow for declarative applications.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Reducer ──→ State ──→ Selector ──→ View
//!    ↑                                           │
//!    └───────────────────────────────────────────┘
//! ```
//!
//! - **State**: immutable value tree describing the whole application
//! - **Action**: a value declaring that something happened
//! - **Reducer**: pure function `(State, Action) -> State`
//! - **Store**: owns the current state and is the only place transitions happen
//! - **Selector**: derives the slice of state a subscriber cares about
//!
//! Views never mutate state. They dispatch actions, the store applies the
//! reducer, and subscribers are notified when their selected slice changed.
//!
//! # Example
//!
//! ```
//! use immutabledata::{Action, Reducer, State, Store};
//! use std::convert::Infallible;
//!
//! #[derive(Clone, PartialEq, Default, Debug)]
//! struct Counter {
//!     count: i64,
//! }
//!
//! impl State for Counter {}
//!
//! enum CounterAction {
//!     Increment,
//!     Decrement,
//! }
//!
//! impl Action for CounterAction {}
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = Counter;
//!     type Action = CounterAction;
//!     type Error = Infallible;
//!
//!     fn reduce(state: Counter, action: CounterAction) -> Result<Counter, Infallible> {
//!         Ok(match action {
//!             CounterAction::Increment => Counter { count: state.count + 1 },
//!             CounterAction::Decrement => Counter { count: state.count - 1 },
//!         })
//!     }
//! }
//!
//! # fn main() -> Result<(), immutabledata::StoreError<Infallible>> {
//! let store = Store::<CounterReducer>::new(Counter::default());
//! let _sub = store.subscribe(|s: &Counter| s.count, |count| {
//!     println!("count is now {count}");
//! });
//!
//! store.dispatch(CounterAction::Increment)?;
//! assert_eq!(store.state().count, 1);
//! store.dispatch(CounterAction::Decrement)?;
//! assert_eq!(store.state().count, 0);
//! # Ok(())
//! # }
//! ```

mod action;
mod error;
mod journal;
mod reducer;
mod selector;
mod state;
mod store;

pub use action::Action;
pub use error::StoreError;
pub use journal::Journal;
pub use reducer::{replay, Reducer};
pub use selector::Selector;
pub use state::State;
pub use store::{DispatchOutcome, Store, Subscription};
