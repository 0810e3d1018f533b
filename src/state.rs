//! Base trait for application state.

/// Marker trait for state objects.
///
/// States should be:
/// - Immutable (Clone to create new states)
/// - Self-contained (the whole application's data at a point in time)
/// - Comparable (PartialEq for detecting changes)
///
/// The store replaces state wholesale on each transition. A snapshot handed
/// out earlier is never mutated by later dispatches.
pub trait State: Clone + PartialEq + Default + Send + 'static {}
