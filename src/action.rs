//! Base trait for actions dispatched to the store.

/// Marker trait for action objects.
///
/// Actions represent:
/// - User interactions (button taps, key presses)
/// - System events (network responses, timers, database changes)
/// - Failures from asynchronous work, carried as data
///
/// An action carries only the data needed to describe the event. It holds
/// no behavior and no reference back to state or views. Actions are
/// processed by reducers to produce new states.
pub trait Action: Send + 'static {}
