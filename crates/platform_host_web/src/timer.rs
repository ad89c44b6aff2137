//! `setTimeout`-backed implementation of [`platform_host::TimerService`].

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
    time::Duration,
};

use platform_host::{TimerHandle, TimerService, TimerTask};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

/// A scheduled timeout owned by the service until it fires or is cancelled.
///
/// Dropping the entry clears the browser timeout and frees the callback together with the task
/// it captured.
struct ScheduledTimeout {
    #[cfg(target_arch = "wasm32")]
    browser_id: i32,
    #[cfg(target_arch = "wasm32")]
    _callback: Closure<dyn FnMut()>,
    #[cfg(not(target_arch = "wasm32"))]
    _task: TimerTask,
}

#[cfg(target_arch = "wasm32")]
impl Drop for ScheduledTimeout {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(self.browser_id);
        }
    }
}

type ActiveTimeouts = Rc<RefCell<HashMap<u64, ScheduledTimeout>>>;

#[derive(Default)]
/// Browser timer service. Fired tasks are driven with `wasm_bindgen_futures::spawn_local`.
///
/// On non-wasm targets schedules are held until cancelled and never fire.
pub struct BrowserTimerService {
    next_id: Cell<u64>,
    active: ActiveTimeouts,
}

impl std::fmt::Debug for BrowserTimerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserTimerService")
            .field("active", &self.active_count())
            .finish()
    }
}

impl BrowserTimerService {
    fn next_handle(&self) -> TimerHandle {
        let id = self.next_id.get().saturating_add(1);
        self.next_id.set(id);
        TimerHandle(id)
    }

    /// Number of timeouts that have neither fired nor been cancelled.
    pub fn active_count(&self) -> usize {
        self.active.borrow().len()
    }

    #[cfg(target_arch = "wasm32")]
    fn start(&self, handle: TimerHandle, delay: Duration, task: TimerTask) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let active = Rc::clone(&self.active);
        let mut task = Some(task);
        let callback = Closure::<dyn FnMut()>::new(move || {
            // The entry owns this closure; it is dropped from the spawned future, after the
            // callback has returned.
            let entry = active.borrow_mut().remove(&handle.0);
            let task = task.take();
            wasm_bindgen_futures::spawn_local(async move {
                if let Some(task) = task {
                    task().await;
                }
                drop(entry);
            });
        });
        let delay_ms = delay.as_millis().min(i32::MAX as u128) as i32;
        if let Ok(browser_id) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay_ms,
        ) {
            self.active.borrow_mut().insert(
                handle.0,
                ScheduledTimeout {
                    browser_id,
                    _callback: callback,
                },
            );
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn start(&self, handle: TimerHandle, _delay: Duration, task: TimerTask) {
        self.active
            .borrow_mut()
            .insert(handle.0, ScheduledTimeout { _task: task });
    }
}

impl TimerService for BrowserTimerService {
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerHandle {
        let handle = self.next_handle();
        self.start(handle, delay, task);
        handle
    }

    fn cancel(&self, handle: TimerHandle) {
        let entry = self.active.borrow_mut().remove(&handle.0);
        drop(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracked_task(witness: &Rc<()>) -> TimerTask {
        let witness = Rc::clone(witness);
        Box::new(move || {
            Box::pin(async move {
                let _ = witness;
            })
        })
    }

    #[test]
    fn cancel_releases_the_scheduled_task() {
        let timers = BrowserTimerService::default();
        let witness = Rc::new(());

        let first = timers.schedule(Duration::from_millis(2000), tracked_task(&witness));
        let second = timers.schedule(Duration::from_millis(2000), tracked_task(&witness));
        assert_ne!(first, second);
        assert_eq!(timers.active_count(), 2);
        assert_eq!(Rc::strong_count(&witness), 3);

        timers.cancel(first);
        assert_eq!(timers.active_count(), 1);
        assert_eq!(Rc::strong_count(&witness), 2);

        timers.cancel(second);
        timers.cancel(second);
        assert_eq!(timers.active_count(), 0);
        assert_eq!(Rc::strong_count(&witness), 1);
    }

    #[test]
    fn superseded_schedules_do_not_accumulate() {
        let timers = BrowserTimerService::default();
        let witness = Rc::new(());
        let mut pending = None;

        for _ in 0..50 {
            if let Some(previous) = pending.take() {
                timers.cancel(previous);
            }
            pending = Some(timers.schedule(Duration::from_millis(2000), tracked_task(&witness)));
        }

        assert_eq!(timers.active_count(), 1);
        assert_eq!(Rc::strong_count(&witness), 2);
    }
}
