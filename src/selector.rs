//! Selectors derive view-relevant slices of state.

/// A pure projection from state to a derived value.
///
/// Selectors drive change detection for subscriptions: after each completed
/// dispatch the store re-runs the selector and compares the output by value
/// equality with the previous output. The subscriber's callback fires only
/// when the two differ, so a dispatch that leaves the selected slice
/// untouched produces no notification.
///
/// Any `Fn(&S) -> T` closure is a selector, so call sites can usually pass
/// `|state| state.field` directly.
pub trait Selector<S> {
    /// The derived value this selector produces.
    type Output: Clone + PartialEq + Send + 'static;

    /// Derive the output from a state snapshot.
    fn select(&self, state: &S) -> Self::Output;
}

impl<S, T, F> Selector<S> for F
where
    F: Fn(&S) -> T,
    T: Clone + PartialEq + Send + 'static,
{
    type Output = T;

    fn select(&self, state: &S) -> T {
        self(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    struct Model {
        count: i64,
        label: String,
    }

    #[test]
    fn closure_is_a_selector() {
        let model = Model {
            count: 7,
            label: "seven".to_string(),
        };
        let count = |m: &Model| m.count;
        assert_eq!(count.select(&model), 7);
    }

    #[test]
    fn selector_output_is_detached_from_state() {
        let model = Model {
            count: 1,
            label: "one".to_string(),
        };
        let label = |m: &Model| m.label.clone();
        let out = label.select(&model);
        drop(model);
        assert_eq!(out, "one");
    }
}
