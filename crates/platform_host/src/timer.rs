//! One-shot timer contracts used for debounced background work.

use std::{
    cell::RefCell,
    collections::BTreeMap,
    future::Future,
    pin::Pin,
    rc::Rc,
    time::Duration,
};

/// Boxed local future produced by a fired [`TimerTask`].
pub type TimerTaskFuture = Pin<Box<dyn Future<Output = ()> + 'static>>;

/// Deferred work handed to a [`TimerService`]. The returned future is driven to completion by
/// the service once the delay elapses.
pub type TimerTask = Box<dyn FnOnce() -> TimerTaskFuture + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Opaque handle for a scheduled timer.
pub struct TimerHandle(pub u64);

/// Host service for cancellable one-shot timers on the UI event loop.
pub trait TimerService {
    /// Schedules `task` to run once after `delay`.
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerHandle;

    /// Cancels a pending timer. Cancelling a fired or unknown handle is a no-op.
    fn cancel(&self, handle: TimerHandle);
}

struct PendingTimer {
    due: Duration,
    task: TimerTask,
}

#[derive(Default)]
struct ManualTimerState {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<u64, PendingTimer>,
    fired: u64,
}

#[derive(Clone, Default)]
/// Deterministic timer service driven by a virtual clock.
///
/// Nothing fires until [`ManualTimerService::advance`] moves the clock past a timer's due time.
/// Fired tasks run to completion on the calling thread in due order (ties in schedule order).
pub struct ManualTimerService {
    inner: Rc<RefCell<ManualTimerState>>,
}

impl std::fmt::Debug for ManualTimerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("ManualTimerService")
            .field("now", &state.now)
            .field("pending", &state.pending.len())
            .field("fired", &state.fired)
            .finish()
    }
}

impl ManualTimerService {
    /// Current virtual time since the service was created.
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Number of scheduled timers that have neither fired nor been cancelled.
    pub fn pending_count(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Number of timers that have fired so far.
    pub fn fired_count(&self) -> u64 {
        self.inner.borrow().fired
    }

    /// Advances the virtual clock by `by`, running every timer that becomes due.
    pub fn advance(&self, by: Duration) {
        let target = self.inner.borrow().now.saturating_add(by);
        loop {
            let next = {
                let mut state = self.inner.borrow_mut();
                let due_id = state
                    .pending
                    .iter()
                    .filter(|(_, timer)| timer.due <= target)
                    .min_by_key(|(id, timer)| (timer.due, **id))
                    .map(|(id, _)| *id);
                due_id.and_then(|id| state.pending.remove(&id)).map(|timer| {
                    state.now = timer.due;
                    state.fired = state.fired.saturating_add(1);
                    timer.task
                })
            };
            let Some(task) = next else {
                break;
            };
            futures::executor::block_on(task());
        }
        self.inner.borrow_mut().now = target;
    }
}

impl TimerService for ManualTimerService {
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerHandle {
        let mut state = self.inner.borrow_mut();
        state.next_id = state.next_id.saturating_add(1);
        let id = state.next_id;
        let due = state.now.saturating_add(delay);
        state.pending.insert(id, PendingTimer { due, task });
        TimerHandle(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        self.inner.borrow_mut().pending.remove(&handle.0);
    }
}
