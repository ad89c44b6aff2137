//! Form instance controller: draft loading, debounced autosave, close and submit protocols.
//!
//! The controller is UI-agnostic. The Leptos view mirrors its state into signals, while tests
//! drive it directly with [`platform_host::ManualTimerService`].

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
    time::Duration,
};

use form_drafts::DraftStore;
use leptos::logging::warn;
use platform_host::{TimerHandle, TimerService, TimerTask};
use serde::{de::DeserializeOwned, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Whether the form creates a new entity or edits an existing one.
pub enum FormMode {
    /// New entity: drafts are loaded and autosaved.
    New,
    /// Existing entity: drafts are never loaded or written.
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of asking the form to close.
pub enum CloseDecision {
    /// Nothing to lose; close right away.
    CloseNow,
    /// Unsaved changes; ask the user for a [`CloseChoice`].
    Prompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// User answer to the unsaved-changes prompt.
pub enum CloseChoice {
    /// Delete the draft and close.
    Discard,
    /// Write the draft now and close.
    SaveDraft,
    /// Keep the window open.
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Notifications for the view layer.
pub enum ControllerEvent {
    /// A draft was written; the saved notice is now visible.
    DraftSaved,
    /// The saved notice expired.
    NoticeHidden,
}

/// Cancels its timer when dropped.
struct TimerGuard {
    timers: Rc<dyn TimerService>,
    handle: TimerHandle,
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.timers.cancel(self.handle);
    }
}

/// Settings shared by every controller instance.
#[derive(Clone)]
pub struct ControllerDeps {
    /// Draft persistence.
    pub drafts: DraftStore,
    /// Timer service for autosave and notice expiry.
    pub timers: Rc<dyn TimerService>,
    /// Quiet period before an autosave.
    pub debounce: Duration,
    /// How long the saved notice stays visible.
    pub notice: Duration,
}

struct ControllerState<T> {
    values: T,
    dirty: bool,
    disposed: bool,
    save_generation: u64,
    pending_save: Option<TimerGuard>,
    notice_visible: bool,
    notice_timer: Option<TimerGuard>,
    listener: Option<Rc<dyn Fn(ControllerEvent)>>,
}

struct ControllerInner<T> {
    window_id: String,
    mode: FormMode,
    deps: ControllerDeps,
    state: RefCell<ControllerState<T>>,
}

/// Owns the editable values of one form window.
///
/// At most one autosave is pending at a time; each edit replaces it. Every path that ends the
/// edit session (submit, discard, save-and-close, [`FormController::dispose`], or dropping the
/// last handle) cancels the pending save.
pub struct FormController<T> {
    inner: Rc<ControllerInner<T>>,
}

impl<T> Clone for FormController<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> std::fmt::Debug for FormController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("FormController")
            .field("window_id", &self.inner.window_id)
            .field("mode", &self.inner.mode)
            .field("dirty", &state.dirty)
            .field("save_pending", &state.pending_save.is_some())
            .finish()
    }
}

impl<T> FormController<T>
where
    T: Clone + Serialize + DeserializeOwned + 'static,
{
    /// Creates a controller for `window_id` starting from `initial` values.
    pub fn new(
        window_id: impl Into<String>,
        mode: FormMode,
        initial: T,
        deps: ControllerDeps,
    ) -> Self {
        Self {
            inner: Rc::new(ControllerInner {
                window_id: window_id.into(),
                mode,
                deps,
                state: RefCell::new(ControllerState {
                    values: initial,
                    dirty: false,
                    disposed: false,
                    save_generation: 0,
                    pending_save: None,
                    notice_visible: false,
                    notice_timer: None,
                    listener: None,
                }),
            }),
        }
    }

    /// Window id doubling as the draft key.
    pub fn window_id(&self) -> &str {
        &self.inner.window_id
    }

    /// Form mode.
    pub fn mode(&self) -> FormMode {
        self.inner.mode
    }

    /// Registers the view-layer listener.
    pub fn set_listener(&self, listener: impl Fn(ControllerEvent) + 'static) {
        self.inner.state.borrow_mut().listener = Some(Rc::new(listener));
    }

    /// Replaces the initial values with a stored draft (new mode only).
    ///
    /// Returns `true` when a draft was applied. Edits made before the draft arrives win.
    pub async fn load(&self) -> bool {
        if self.inner.mode == FormMode::Edit {
            return false;
        }
        let Some(record) = self.inner.deps.drafts.get_draft(&self.inner.window_id).await else {
            return false;
        };
        let values = match serde_json::from_value::<T>(record.form_data) {
            Ok(values) => values,
            Err(err) => {
                warn!(
                    "[customer_form] ignoring unreadable draft `{}`: {err}",
                    self.inner.window_id
                );
                return false;
            }
        };
        let mut state = self.inner.state.borrow_mut();
        if state.disposed || state.dirty {
            return false;
        }
        state.values = values;
        true
    }

    /// Snapshot of the current values.
    pub fn values(&self) -> T {
        self.inner.state.borrow().values.clone()
    }

    /// Whether edits happened since the last save, discard, or submit.
    pub fn has_unsaved_changes(&self) -> bool {
        self.inner.state.borrow().dirty
    }

    /// Whether an autosave is scheduled.
    pub fn save_pending(&self) -> bool {
        self.inner.state.borrow().pending_save.is_some()
    }

    /// Whether the "Draft saved" notice should be shown.
    pub fn notice_visible(&self) -> bool {
        self.inner.state.borrow().notice_visible
    }

    /// Applies an edit, marks the form dirty, and (new mode) restarts the autosave timer.
    pub fn update(&self, edit: impl FnOnce(&mut T)) {
        {
            let mut state = self.inner.state.borrow_mut();
            if state.disposed {
                return;
            }
            edit(&mut state.values);
            state.dirty = true;
        }
        if self.inner.mode == FormMode::New {
            self.schedule_save();
        }
    }

    /// Decides whether closing needs the unsaved-changes prompt.
    pub fn request_close(&self) -> CloseDecision {
        if self.inner.mode == FormMode::Edit || !self.has_unsaved_changes() {
            CloseDecision::CloseNow
        } else {
            CloseDecision::Prompt
        }
    }

    /// Carries out the user's prompt answer. Returns `true` when the window should close.
    pub async fn resolve_close(&self, choice: CloseChoice) -> bool {
        match choice {
            CloseChoice::Cancel => false,
            CloseChoice::Discard => {
                self.cancel_pending_save();
                self.inner
                    .deps
                    .drafts
                    .delete_draft(&self.inner.window_id)
                    .await;
                self.inner.state.borrow_mut().dirty = false;
                true
            }
            CloseChoice::SaveDraft => {
                self.flush_draft().await;
                true
            }
        }
    }

    /// Cancels any pending autosave and writes the current values immediately.
    pub async fn flush_draft(&self) {
        self.cancel_pending_save();
        let snapshot = self.values();
        self.write_draft(&snapshot).await;
    }

    /// Validates and finalizes the form.
    ///
    /// On success the pending autosave is cancelled, the draft is deleted (new mode), and the
    /// submitted snapshot is returned for the caller's submit handler. On failure nothing
    /// changes.
    ///
    /// # Errors
    ///
    /// Returns the validation error unchanged.
    pub async fn submit<E>(&self, validate: impl FnOnce(&T) -> Result<(), E>) -> Result<T, E> {
        let snapshot = self.values();
        validate(&snapshot)?;
        self.cancel_pending_save();
        if self.inner.mode == FormMode::New {
            self.inner
                .deps
                .drafts
                .delete_draft(&self.inner.window_id)
                .await;
        }
        self.inner.state.borrow_mut().dirty = false;
        Ok(snapshot)
    }

    /// Ends the session: cancels timers and ignores any later callbacks.
    pub fn dispose(&self) {
        let (pending, notice) = {
            let mut state = self.inner.state.borrow_mut();
            state.disposed = true;
            state.listener = None;
            (state.pending_save.take(), state.notice_timer.take())
        };
        drop(pending);
        drop(notice);
    }

    fn cancel_pending_save(&self) {
        let pending = self.inner.state.borrow_mut().pending_save.take();
        drop(pending);
    }

    fn schedule_save(&self) {
        let generation = {
            let mut state = self.inner.state.borrow_mut();
            state.save_generation = state.save_generation.saturating_add(1);
            state.save_generation
        };
        let weak = Rc::downgrade(&self.inner);
        let task: TimerTask = Box::new(move || {
            Box::pin(async move {
                if let Some(controller) = upgrade(&weak) {
                    controller.run_scheduled_save(generation).await;
                }
            })
        });
        let timers = Rc::clone(&self.inner.deps.timers);
        let handle = timers.schedule(self.inner.deps.debounce, task);
        let previous = self
            .inner
            .state
            .borrow_mut()
            .pending_save
            .replace(TimerGuard { timers, handle });
        drop(previous);
    }

    async fn run_scheduled_save(&self, generation: u64) {
        let snapshot = {
            let mut state = self.inner.state.borrow_mut();
            // A newer edit owns the pending slot; its own timer will save.
            if state.disposed || state.save_generation != generation {
                return;
            }
            let fired = state.pending_save.take();
            // The timer already fired, so cancelling its handle is a no-op.
            drop(fired);
            state.values.clone()
        };
        self.write_draft(&snapshot).await;
    }

    async fn write_draft(&self, snapshot: &T) {
        if self.inner.mode == FormMode::Edit {
            return;
        }
        let saved = self
            .inner
            .deps
            .drafts
            .save_draft(&self.inner.window_id, snapshot)
            .await;
        if saved {
            self.show_notice();
        }
    }

    fn show_notice(&self) {
        if self.inner.state.borrow().disposed {
            return;
        }
        let weak = Rc::downgrade(&self.inner);
        let task: TimerTask = Box::new(move || {
            Box::pin(async move {
                if let Some(controller) = upgrade(&weak) {
                    controller.hide_notice();
                }
            })
        });
        let timers = Rc::clone(&self.inner.deps.timers);
        let handle = timers.schedule(self.inner.deps.notice, task);
        let (previous, listener) = {
            let mut state = self.inner.state.borrow_mut();
            state.notice_visible = true;
            let previous = state.notice_timer.replace(TimerGuard { timers, handle });
            (previous, state.listener.clone())
        };
        drop(previous);
        if let Some(listener) = listener {
            listener(ControllerEvent::DraftSaved);
        }
    }

    fn hide_notice(&self) {
        let listener = {
            let mut state = self.inner.state.borrow_mut();
            if state.disposed {
                return;
            }
            state.notice_visible = false;
            state.notice_timer = None;
            state.listener.clone()
        };
        if let Some(listener) = listener {
            listener(ControllerEvent::NoticeHidden);
        }
    }
}

fn upgrade<T>(weak: &Weak<ControllerInner<T>>) -> Option<FormController<T>> {
    weak.upgrade().map(|inner| FormController { inner })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use form_drafts::DraftKeys;
    use futures::executor::block_on;
    use platform_host::{ManualTimerService, MemoryKeyValueStore};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::{
        model::{CustomerField, CustomerFormData},
        validation::{validate_customer, CustomerFormError},
    };

    const DEBOUNCE: Duration = Duration::from_millis(2000);
    const NOTICE: Duration = Duration::from_millis(2000);

    struct Harness {
        drafts: DraftStore,
        memory: MemoryKeyValueStore,
        timers: ManualTimerService,
    }

    impl Harness {
        fn new() -> Self {
            let memory = MemoryKeyValueStore::default();
            Self {
                drafts: DraftStore::new(Rc::new(memory.clone()), DraftKeys::default()),
                memory,
                timers: ManualTimerService::default(),
            }
        }

        fn deps(&self) -> ControllerDeps {
            ControllerDeps {
                drafts: self.drafts.clone(),
                timers: Rc::new(self.timers.clone()),
                debounce: DEBOUNCE,
                notice: NOTICE,
            }
        }

        fn controller(&self, id: &str, mode: FormMode) -> FormController<CustomerFormData> {
            FormController::new(id, mode, CustomerFormData::default(), self.deps())
        }

        fn stored(&self, id: &str) -> Option<CustomerFormData> {
            block_on(self.drafts.get_draft(id))
                .map(|record| serde_json::from_value(record.form_data).expect("draft decodes"))
        }
    }

    fn type_name(controller: &FormController<CustomerFormData>, name: &str) {
        controller.update(|data| data.set_field(CustomerField::Name, name));
    }

    #[test]
    fn autosave_writes_typed_values_after_quiet_period() {
        let h = Harness::new();
        let form = h.controller("w1", FormMode::New);

        type_name(&form, "Ann");
        h.timers.advance(Duration::from_millis(1999));
        assert_eq!(h.stored("w1"), None);

        h.timers.advance(Duration::from_millis(1));
        let stored = h.stored("w1").expect("draft saved");
        assert_eq!(stored.name, "Ann");
        assert_eq!(stored.referred_to, "OWNER");
        assert!(!form.save_pending());
    }

    #[test]
    fn rapid_edits_collapse_into_one_save_of_latest_snapshot() {
        let h = Harness::new();
        let form = h.controller("w1", FormMode::New);

        for name in ["A", "An", "Ann", "Anna"] {
            type_name(&form, name);
            h.timers.advance(Duration::from_millis(500));
        }
        assert_eq!(h.stored("w1"), None);

        h.timers.advance(DEBOUNCE);
        assert_eq!(h.stored("w1").map(|d| d.name), Some("Anna".to_string()));
        assert_eq!(h.timers.fired_count(), 1);
    }

    #[test]
    fn edit_mode_never_touches_drafts() {
        let h = Harness::new();
        block_on(h.drafts.save_draft("customer-7", &json!({"name": "Stale"})));
        let form = h.controller("customer-7", FormMode::Edit);

        assert!(!block_on(form.load()));
        type_name(&form, "Changed");
        assert!(!form.save_pending());
        assert_eq!(h.timers.pending_count(), 0);
        assert_eq!(form.request_close(), CloseDecision::CloseNow);
        assert_eq!(h.stored("customer-7").map(|d| d.name), Some("Stale".to_string()));
    }

    #[test]
    fn new_mode_restores_saved_draft_on_load() {
        let h = Harness::new();
        let first = h.controller("w1", FormMode::New);
        first.update(|data| {
            data.set_field(CustomerField::Name, "Ann");
            data.add_metadata_pair();
            data.update_metadata_pair(0, Some("grade"), Some("5"));
        });
        h.timers.advance(DEBOUNCE);
        drop(first);

        let reopened = h.controller("w1", FormMode::New);
        assert!(block_on(reopened.load()));
        let values = reopened.values();
        assert_eq!(values.name, "Ann");
        assert_eq!(values.metadata.get("grade"), Some(&"5".to_string()));
        assert_eq!(values.metadata_pairs.len(), 1);
        assert!(!reopened.has_unsaved_changes());
    }

    #[test]
    fn unreadable_draft_keeps_initial_values() {
        let h = Harness::new();
        block_on(h.drafts.save_draft("w1", &json!({"gender": 42})));
        let form = h.controller("w1", FormMode::New);

        assert!(!block_on(form.load()));
        assert_eq!(form.values(), CustomerFormData::default());
    }

    #[test]
    fn clean_form_closes_without_prompt() {
        let h = Harness::new();
        let form = h.controller("w1", FormMode::New);
        assert_eq!(form.request_close(), CloseDecision::CloseNow);

        type_name(&form, "Ann");
        assert_eq!(form.request_close(), CloseDecision::Prompt);
    }

    #[test]
    fn discard_deletes_draft_and_cancels_pending_save() {
        let h = Harness::new();
        let form = h.controller("w1", FormMode::New);
        type_name(&form, "Ann");
        h.timers.advance(DEBOUNCE);
        type_name(&form, "Ann B");

        assert!(block_on(form.resolve_close(CloseChoice::Discard)));
        h.timers.advance(DEBOUNCE * 2);

        assert_eq!(h.stored("w1"), None);
        assert!(block_on(h.drafts.get_all_draft_ids()).is_empty());
        assert!(!form.has_unsaved_changes());
    }

    #[test]
    fn save_draft_choice_flushes_latest_values_immediately() {
        let h = Harness::new();
        let form = h.controller("w1", FormMode::New);
        type_name(&form, "Ann");

        assert!(block_on(form.resolve_close(CloseChoice::SaveDraft)));
        assert!(!form.save_pending());
        assert_eq!(h.stored("w1").map(|d| d.name), Some("Ann".to_string()));

        let reopened = h.controller("w1", FormMode::New);
        assert!(block_on(reopened.load()));
        assert_eq!(reopened.values().name, "Ann");
    }

    #[test]
    fn cancel_choice_keeps_everything() {
        let h = Harness::new();
        let form = h.controller("w1", FormMode::New);
        type_name(&form, "Ann");

        assert!(!block_on(form.resolve_close(CloseChoice::Cancel)));
        assert!(form.save_pending());
        assert!(form.has_unsaved_changes());
    }

    #[test]
    fn failed_validation_keeps_draft_and_dirty_state() {
        let h = Harness::new();
        let form = h.controller("w1", FormMode::New);
        type_name(&form, "Ann");
        h.timers.advance(DEBOUNCE);

        let result = block_on(form.submit(validate_customer));
        assert_eq!(result, Err(CustomerFormError::MissingPhone));
        assert!(h.stored("w1").is_some());
        assert!(form.has_unsaved_changes());
    }

    #[test]
    fn successful_submit_clears_draft_and_cancels_timer() {
        let h = Harness::new();
        let form = h.controller("w1", FormMode::New);
        form.update(|data| {
            data.set_field(CustomerField::Name, "Ann");
            data.set_field(CustomerField::Phone, "555");
        });
        h.timers.advance(DEBOUNCE);
        type_name(&form, "Ann Lee");

        let submitted = block_on(form.submit(validate_customer)).expect("valid");
        h.timers.advance(DEBOUNCE * 2);

        assert_eq!(submitted.name, "Ann Lee");
        assert_eq!(h.stored("w1"), None);
        assert!(block_on(h.drafts.get_all_draft_ids()).is_empty());
        assert!(!form.has_unsaved_changes());
    }

    #[test]
    fn edit_mode_submit_leaves_stored_drafts_alone() {
        let h = Harness::new();
        block_on(h.drafts.save_draft("customer-edit-7", &json!({"name": "Kept"})));
        let before = h.memory.raw("crm.form_draft.index");
        let form = h.controller("customer-edit-7", FormMode::Edit);
        form.update(|data| {
            data.set_field(CustomerField::Name, "Ann");
            data.set_field(CustomerField::Phone, "555");
        });

        let submitted = block_on(form.submit(validate_customer)).expect("valid");

        assert_eq!(submitted.name, "Ann");
        assert_eq!(h.stored("customer-edit-7").map(|d| d.name), Some("Kept".to_string()));
        assert_eq!(h.memory.raw("crm.form_draft.index"), before);
        assert!(!form.has_unsaved_changes());
    }

    #[test]
    fn dispose_and_drop_cancel_pending_save() {
        let h = Harness::new();
        let disposed = h.controller("w1", FormMode::New);
        type_name(&disposed, "Ann");
        disposed.dispose();
        type_name(&disposed, "ignored");

        let dropped = h.controller("w2", FormMode::New);
        type_name(&dropped, "Bob");
        drop(dropped);

        assert_eq!(h.timers.pending_count(), 0);
        h.timers.advance(DEBOUNCE * 2);
        assert!(h.memory.keys().is_empty());
        assert_eq!(disposed.values().name, "Ann");
    }

    #[test]
    fn saved_notice_shows_then_expires() {
        let h = Harness::new();
        let form = h.controller("w1", FormMode::New);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        form.set_listener(move |event| sink.borrow_mut().push(event));

        type_name(&form, "Ann");
        h.timers.advance(DEBOUNCE);
        assert!(form.notice_visible());

        h.timers.advance(NOTICE);
        assert!(!form.notice_visible());
        assert_eq!(
            *events.borrow(),
            vec![ControllerEvent::DraftSaved, ControllerEvent::NoticeHidden]
        );
    }

    #[test]
    fn stale_fired_save_does_not_cancel_newer_timer() {
        let h = Harness::new();
        let form = h.controller("w1", FormMode::New);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        form.set_listener(move |event| {
            if event == ControllerEvent::DraftSaved {
                counter.set(counter.get() + 1);
            }
        });

        type_name(&form, "A");
        let stale_generation = form.inner.state.borrow().save_generation;
        type_name(&form, "AB");

        block_on(form.run_scheduled_save(stale_generation));
        assert!(form.save_pending());
        assert_eq!(calls.get(), 0);

        h.timers.advance(DEBOUNCE);
        assert_eq!(h.stored("w1").map(|d| d.name), Some("AB".to_string()));
        assert_eq!(calls.get(), 1);
    }
}
