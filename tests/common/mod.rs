//! Virtual-clock timer for driving `Debouncer` in native tests.

use loan_calculator::Timer;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Slot = Rc<RefCell<Option<Box<dyn FnOnce()>>>>;

thread_local! {
    static NOW_MS: Cell<u64> = const { Cell::new(0) };
    static QUEUE: RefCell<Vec<(u64, Slot)>> = const { RefCell::new(Vec::new()) };
}

/// Fires only when [`advance`] moves the clock past its deadline; dropping
/// the handle cancels it, like a browser timeout.
pub struct ManualTimer {
    slot: Slot,
}

impl Timer for ManualTimer {
    fn schedule<F>(delay_ms: u32, callback: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        let slot: Slot = Rc::new(RefCell::new(Some(Box::new(callback))));
        let due = NOW_MS.with(|now| now.get()) + delay_ms as u64;
        QUEUE.with(|q| q.borrow_mut().push((due, Rc::clone(&slot))));
        ManualTimer { slot }
    }
}

impl Drop for ManualTimer {
    fn drop(&mut self) {
        self.slot.borrow_mut().take();
    }
}

/// Move the virtual clock forward, running every live timer that comes due.
pub fn advance(ms: u64) {
    let now = NOW_MS.with(|n| {
        n.set(n.get() + ms);
        n.get()
    });

    let due: Vec<Slot> = QUEUE.with(|q| {
        let mut queue = q.borrow_mut();
        let (ready, waiting): (Vec<_>, Vec<_>) =
            queue.drain(..).partition(|(deadline, _)| *deadline <= now);
        *queue = waiting;
        ready.into_iter().map(|(_, slot)| slot).collect()
    });

    for slot in due {
        let callback = slot.borrow_mut().take();
        if let Some(callback) = callback {
            callback();
        }
    }
}

/// Timers scheduled and not yet fired or cancelled.
pub fn live_timers() -> usize {
    QUEUE.with(|q| {
        q.borrow()
            .iter()
            .filter(|(_, slot)| slot.borrow().is_some())
            .count()
    })
}
