//! Subscription handles.

use std::fmt;

/// RAII handle for a store subscription.
///
/// A subscription exists only while its consumer is active: dropping the
/// handle removes the subscriber from the store. The handle holds no strong
/// reference to the store, so it never keeps a store alive on its own.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub(crate) fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Remove the subscriber now instead of at drop.
    pub fn cancel(mut self) {
        self.run();
    }

    /// Keep the subscriber registered for the lifetime of the store.
    ///
    /// After detaching there is no way to remove the subscriber again.
    pub fn detach(mut self) {
        self.cancel = None;
    }

    /// Whether this handle still controls a registered subscriber.
    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }

    fn run(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
