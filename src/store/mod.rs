//! Thread-safe state container with dispatch and subscriptions.
//!
//! The store is the single writer for application state: every transition
//! goes through [`Store::dispatch`], one action at a time, in dispatch
//! order. Reads are cheap clones of the current snapshot and never block
//! behind a transition for longer than the state swap itself.

mod subscription;

pub use subscription::Subscription;

use std::collections::VecDeque;
use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::error::StoreError;
use crate::reducer::Reducer;
use crate::selector::Selector;

/// Result of a successful dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The reducer ran and the store holds the resulting state.
    ///
    /// `changed` is false when the reducer returned a state equal to the
    /// previous one; no subscriber is notified in that case.
    Applied { changed: bool },
    /// The action arrived while another transition was in progress and has
    /// been queued behind it. This covers dispatches from inside a
    /// subscriber callback as well as dispatches from other threads that
    /// land during a notification pass. A queued action that the reducer
    /// later rejects is logged, not surfaced.
    Deferred,
}

struct SubscriberEntry<S> {
    id: u64,
    /// Runs the selector against the new state, compares with the cached
    /// previous output, and invokes the callback on change. Returns whether
    /// the callback fired.
    notify: Box<dyn FnMut(&S) -> bool + Send>,
}

struct Inner<S, A> {
    state: S,
    subscribers: Vec<SubscriberEntry<S>>,
    /// Actions dispatched re-entrantly from subscriber callbacks, applied
    /// after the in-flight transition finishes notifying.
    pending: VecDeque<A>,
    /// Ids cancelled while their entries were checked out for notification.
    removed: Vec<u64>,
    dispatching: bool,
    next_id: u64,
}

/// Owner of the current application state.
///
/// Cloning a `Store` is cheap and yields another handle to the same state;
/// all handles observe the same transitions.
pub struct Store<R: Reducer> {
    inner: Arc<Mutex<Inner<R::State, R::Action>>>,
    _reducer: PhantomData<fn() -> R>,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _reducer: PhantomData,
        }
    }
}

impl<R: Reducer> Default for Store<R> {
    fn default() -> Self {
        Self::new(R::State::default())
    }
}

impl<R: Reducer> Store<R> {
    /// Create a store holding `initial` as its first state.
    pub fn new(initial: R::State) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: initial,
                subscribers: Vec::new(),
                pending: VecDeque::new(),
                removed: Vec::new(),
                dispatching: false,
                next_id: 0,
            })),
            _reducer: PhantomData,
        }
    }

    /// Get a clone of the current state snapshot.
    ///
    /// The snapshot is detached from the store: later dispatches never
    /// mutate it. Multiple readers can call this concurrently.
    pub fn state(&self) -> R::State {
        self.inner.lock().state.clone()
    }

    /// Apply the reducer to the current state and `action`.
    ///
    /// On success the new state atomically replaces the old one, then every
    /// subscriber whose selector output changed is notified synchronously,
    /// in registration order. On reducer error the state and subscribers
    /// are untouched and the error is returned to the caller.
    ///
    /// A dispatch that arrives while a transition is already in flight —
    /// from inside a subscriber callback, or from another thread that lands
    /// during a notification pass — does not overlap it: the action is
    /// queued and applied after the current notification pass completes.
    /// Errors from queued actions have no caller left to return to and are
    /// logged instead.
    ///
    /// A panic in the reducer or in a subscriber callback propagates to the
    /// dispatching caller, but the store stays usable: a transition already
    /// applied is kept, checked-out subscribers are restored, and actions
    /// queued behind the aborted transition are dropped with a warning.
    pub fn dispatch(&self, action: R::Action) -> Result<DispatchOutcome, StoreError<R::Error>> {
        {
            let mut guard = self.inner.lock();
            if guard.dispatching {
                tracing::trace!("dispatch while a transition is in flight; action deferred");
                guard.pending.push_back(action);
                return Ok(DispatchOutcome::Deferred);
            }
            guard.dispatching = true;
        }

        // A panicking reducer or callback unwinds through here; without
        // the reset the flag would stay set and route every later
        // dispatch into the deferred branch.
        let _unwind = scopeguard::guard_on_unwind(Arc::clone(&self.inner), |inner| {
            let mut inner = inner.lock();
            inner.dispatching = false;
            if !inner.pending.is_empty() {
                let dropped = inner.pending.len();
                inner.pending.clear();
                tracing::warn!(dropped, "queued actions dropped after panic during dispatch");
            }
        });

        let mut guard = self.inner.lock();
        let outcome = match R::reduce(guard.state.clone(), action) {
            Ok(next) => {
                let changed = next != guard.state;
                if changed {
                    guard.state = next.clone();
                    guard = self.notify_subscribers(guard, &next);
                }
                tracing::debug!(changed, "action applied");
                Ok(DispatchOutcome::Applied { changed })
            }
            Err(err) => Err(StoreError::Rejected(err)),
        };

        // Drain dispatches queued by subscriber callbacks. Each queued
        // action is a full transition of its own.
        while let Some(queued) = guard.pending.pop_front() {
            match R::reduce(guard.state.clone(), queued) {
                Ok(next) => {
                    let changed = next != guard.state;
                    if changed {
                        guard.state = next.clone();
                        guard = self.notify_subscribers(guard, &next);
                    }
                    tracing::debug!(changed, "deferred action applied");
                }
                Err(err) => {
                    tracing::error!(error = %err, "deferred action rejected; state unchanged");
                }
            }
        }

        guard.dispatching = false;
        outcome
    }

    /// Dispatch an ordered batch of actions.
    ///
    /// Stops at the first rejected action; actions applied before the
    /// rejection stay applied.
    pub fn dispatch_all<I>(&self, actions: I) -> Result<(), StoreError<R::Error>>
    where
        I: IntoIterator<Item = R::Action>,
    {
        for action in actions {
            self.dispatch(action)?;
        }
        Ok(())
    }

    /// Register `callback` to run after every dispatch that changes the
    /// output of `selector`, compared by value equality.
    ///
    /// The baseline is the selector output at subscribe time; the callback
    /// is not invoked immediately. The subscription lasts until the
    /// returned handle is cancelled or dropped.
    pub fn subscribe<Sel, F>(&self, selector: Sel, mut callback: F) -> Subscription
    where
        Sel: Selector<R::State> + Send + 'static,
        F: FnMut(&Sel::Output) + Send + 'static,
    {
        let mut guard = self.inner.lock();
        let id = guard.next_id;
        guard.next_id += 1;

        let mut last = selector.select(&guard.state);
        guard.subscribers.push(SubscriberEntry {
            id,
            notify: Box::new(move |state: &R::State| {
                let current = selector.select(state);
                if current == last {
                    return false;
                }
                callback(&current);
                last = current;
                true
            }),
        });
        drop(guard);

        let weak = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                remove_subscriber(&inner, id);
            }
        })
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }

    /// Run one notification pass over all subscribers.
    ///
    /// Entries are checked out of the store so callbacks run without the
    /// lock held — a callback may read state, subscribe, cancel, or
    /// dispatch (deferred) without deadlocking. Subscribers added during
    /// the pass get their first notification on the next dispatch;
    /// cancellations during the pass take effect before the next pass.
    fn notify_subscribers<'a>(
        &'a self,
        mut guard: MutexGuard<'a, Inner<R::State, R::Action>>,
        state: &R::State,
    ) -> MutexGuard<'a, Inner<R::State, R::Action>> {
        let entries = std::mem::take(&mut guard.subscribers);
        drop(guard);

        // The checked-out entries must survive a panicking callback; the
        // guard puts them back while the panic unwinds through `dispatch`.
        let mut entries = scopeguard::guard_on_unwind(entries, |entries| {
            merge_entries(&mut self.inner.lock(), entries);
        });

        for entry in entries.iter_mut() {
            if (entry.notify)(state) {
                tracing::trace!(subscriber = entry.id, "subscriber notified");
            }
        }

        let entries = scopeguard::ScopeGuard::into_inner(entries);
        let mut guard = self.inner.lock();
        merge_entries(&mut guard, entries);
        guard
    }
}

/// Put a checked-out entry list back, folding in subscribers added during
/// the notification pass and dropping ones cancelled during it.
fn merge_entries<S, A>(inner: &mut Inner<S, A>, mut entries: Vec<SubscriberEntry<S>>) {
    let added = std::mem::take(&mut inner.subscribers);
    entries.extend(added);
    if !inner.removed.is_empty() {
        let removed = std::mem::take(&mut inner.removed);
        entries.retain(|entry| !removed.contains(&entry.id));
    }
    inner.subscribers = entries;
}

fn remove_subscriber<S, A>(inner: &Mutex<Inner<S, A>>, id: u64) {
    let mut guard = inner.lock();
    guard.subscribers.retain(|entry| entry.id != id);
    if guard.dispatching {
        // The entry may be checked out for notification right now; record
        // the id so the merge step drops it.
        guard.removed.push(id);
    }
}
