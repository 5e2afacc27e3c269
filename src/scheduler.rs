//! Debounced recompute scheduling.
//!
//! A [`Debouncer`] owns at most one pending timer. Every [`Debouncer::trigger`]
//! replaces it, so only the last event of a burst reaches the action, once the
//! quiet period has passed without another trigger.

use gloo_timers::callback::Timeout;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A one-shot timer that is cancelled when its handle is dropped.
pub trait Timer: Sized + 'static {
    fn schedule<F>(delay_ms: u32, callback: F) -> Self
    where
        F: FnOnce() + 'static;
}

impl Timer for Timeout {
    fn schedule<F>(delay_ms: u32, callback: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Timeout::new(delay_ms, callback)
    }
}

/// Coalesces rapid triggers into a single call of `action`.
pub struct Debouncer<V: 'static, T: Timer = Timeout> {
    delay_ms: u32,
    action: Rc<dyn Fn(V)>,
    pending: RefCell<Option<T>>,
    armed: Rc<Cell<bool>>,
}

impl<V: 'static, T: Timer> Debouncer<V, T> {
    pub fn new<F>(delay_ms: u32, action: F) -> Self
    where
        F: Fn(V) + 'static,
    {
        Self {
            delay_ms,
            action: Rc::new(action),
            pending: RefCell::new(None),
            armed: Rc::new(Cell::new(false)),
        }
    }

    /// (Re)start the quiet period, carrying `value` to the action.
    ///
    /// Returns `true` when an earlier trigger was still waiting and has been
    /// superseded.
    pub fn trigger(&self, value: V) -> bool {
        let action = Rc::clone(&self.action);
        let armed = Rc::clone(&self.armed);
        let timer = T::schedule(self.delay_ms, move || {
            armed.set(false);
            action(value);
        });

        let superseded = self.armed.replace(true);
        // dropping the previous handle cancels it
        self.pending.replace(Some(timer));
        if superseded {
            log::trace!("Debounce timer reset");
        }
        superseded
    }

    /// Drop any pending timer without running the action.
    pub fn cancel(&self) {
        self.pending.replace(None);
        self.armed.set(false);
    }

    /// Whether a trigger is still waiting for its quiet period.
    pub fn is_pending(&self) -> bool {
        self.armed.get()
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }
}
