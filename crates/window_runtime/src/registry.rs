//! Window registry service.
//!
//! [`WindowRegistry`] is the single owner of [`WindowRegistryState`]. It resolves window ids,
//! runs every transition through [`reduce_windows`], and fans the resulting
//! [`RegistryEffect`]s out to subscribers. Actions against unknown windows are dropped.

use std::{cell::RefCell, rc::Rc};

use leptos::logging::debug_warn;

use crate::{
    ids::generate_window_id,
    model::{OpenWindowRequest, WindowId, WindowRecord, WindowRegistryState},
    reducer::{reduce_windows, RegistryEffect, WindowAction},
};

/// Subscriber callback invoked with the effects of each state-changing operation.
pub type RegistryListener = Rc<dyn Fn(&[RegistryEffect])>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Handle returned by [`WindowRegistry::subscribe`].
pub struct SubscriptionId(u64);

struct RegistryInner<C> {
    state: WindowRegistryState<C>,
    listeners: Vec<(SubscriptionId, RegistryListener)>,
    next_subscription: u64,
    id_prefix: String,
}

/// Cheaply cloneable handle to the shared window registry.
pub struct WindowRegistry<C> {
    inner: Rc<RefCell<RegistryInner<C>>>,
}

impl<C> Clone for WindowRegistry<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<C> std::fmt::Debug for WindowRegistry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("WindowRegistry")
            .field("windows", &inner.state.windows.len())
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl<C: Clone> WindowRegistry<C> {
    /// Creates an empty registry. Generated ids default to `<id_prefix>-<ms>-<suffix>`.
    pub fn new(id_prefix: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(RegistryInner {
                state: WindowRegistryState::default(),
                listeners: Vec::new(),
                next_subscription: 0,
                id_prefix: id_prefix.into(),
            })),
        }
    }

    /// Opens a window, or restores the open window that already has the requested id.
    ///
    /// Returns the id of the window now showing.
    pub fn open_window(&self, request: OpenWindowRequest<C>) -> WindowId {
        let window_id = match request.id {
            Some(id) => id,
            None => self.fresh_window_id(request.id_prefix.as_deref()),
        };
        self.dispatch(WindowAction::OpenWindow {
            window_id: window_id.clone(),
            title: request.title,
            content: request.content,
        });
        window_id
    }

    /// Removes a window regardless of its state.
    pub fn close_window(&self, window_id: &WindowId) {
        self.dispatch(WindowAction::CloseWindow {
            window_id: window_id.clone(),
        });
    }

    /// Moves a window into the tray.
    pub fn minimize_window(&self, window_id: &WindowId) {
        self.dispatch(WindowAction::MinimizeWindow {
            window_id: window_id.clone(),
        });
    }

    /// Expands a window to fill the viewport.
    pub fn maximize_window(&self, window_id: &WindowId) {
        self.dispatch(WindowAction::MaximizeWindow {
            window_id: window_id.clone(),
        });
    }

    /// Returns a minimized or maximized window to its normal panel.
    pub fn restore_window(&self, window_id: &WindowId) {
        self.dispatch(WindowAction::RestoreWindow {
            window_id: window_id.clone(),
        });
    }

    /// Snapshot of every open window in opening order.
    pub fn windows(&self) -> Vec<WindowRecord<C>> {
        self.inner.borrow().state.windows.clone()
    }

    /// Snapshot of one window.
    pub fn window(&self, window_id: &WindowId) -> Option<WindowRecord<C>> {
        self.inner.borrow().state.window(window_id).cloned()
    }

    /// Minimized windows, most recently minimized first.
    pub fn minimized_windows(&self) -> Vec<WindowRecord<C>> {
        self.inner
            .borrow()
            .state
            .minimized_windows()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Registers `listener` for future change notifications.
    pub fn subscribe(&self, listener: impl Fn(&[RegistryEffect]) + 'static) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        inner.next_subscription = inner.next_subscription.saturating_add(1);
        let id = SubscriptionId(inner.next_subscription);
        inner.listeners.push((id, Rc::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|(existing, _)| *existing != id);
        inner.listeners.len() != before
    }

    fn fresh_window_id(&self, prefix: Option<&str>) -> WindowId {
        let prefix = prefix
            .map(str::to_string)
            .unwrap_or_else(|| self.inner.borrow().id_prefix.clone());
        loop {
            let id = generate_window_id(&prefix);
            if !self.inner.borrow().state.contains(&id) {
                return id;
            }
        }
    }

    fn dispatch(&self, action: WindowAction<C>) {
        let result = {
            let mut inner = self.inner.borrow_mut();
            reduce_windows(&mut inner.state, action)
        };
        match result {
            Ok(effects) if effects.is_empty() => {}
            Ok(effects) => self.notify(&effects),
            Err(err) => debug_warn!("[window_runtime] ignoring window action: {err}"),
        }
    }

    fn notify(&self, effects: &[RegistryEffect]) {
        // Listeners may read the registry, so the borrow is released before calling them.
        let listeners: Vec<RegistryListener> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(effects);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::WindowState;

    fn registry() -> WindowRegistry<&'static str> {
        WindowRegistry::new("window")
    }

    fn tray_ids(registry: &WindowRegistry<&'static str>) -> Vec<String> {
        registry
            .minimized_windows()
            .into_iter()
            .map(|w| w.id.0)
            .collect()
    }

    #[test]
    fn open_with_explicit_id_is_idempotent() {
        let registry = registry();
        let request = || OpenWindowRequest::new("New Customer", "form").with_id("w1");
        let first = registry.open_window(request());
        let second = registry.open_window(request());

        assert_eq!(first, second);
        assert_eq!(registry.windows().len(), 1);
        assert_eq!(
            registry.window(&first).map(|w| w.state),
            Some(WindowState::Normal)
        );
    }

    #[test]
    fn open_without_id_generates_unique_prefixed_ids() {
        let registry = registry();
        let a = registry.open_window(OpenWindowRequest::new("A", "a"));
        let b = registry.open_window(OpenWindowRequest::new("B", "b").with_id_prefix("customer"));

        assert_ne!(a, b);
        assert!(a.as_str().starts_with("window-"));
        assert!(b.as_str().starts_with("customer-"));
        assert_eq!(registry.windows().len(), 2);
    }

    #[test]
    fn tray_scenario_orders_and_restores() {
        let registry = registry();
        let w1 = registry.open_window(OpenWindowRequest::new("One", "1").with_id("w1"));
        let w2 = registry.open_window(OpenWindowRequest::new("Two", "2").with_id("w2"));

        registry.minimize_window(&w1);
        registry.minimize_window(&w2);
        assert_eq!(tray_ids(&registry), vec!["w2".to_string(), "w1".to_string()]);

        registry.restore_window(&w2);
        assert_eq!(tray_ids(&registry), vec!["w1".to_string()]);

        registry.maximize_window(&w1);
        assert!(tray_ids(&registry).is_empty());
        assert_eq!(
            registry.window(&w1).map(|w| w.state),
            Some(WindowState::Maximized)
        );

        registry.close_window(&w1);
        assert_eq!(registry.window(&w1), None);
    }

    #[test]
    fn subscribers_receive_effects_until_unsubscribed() {
        let registry = registry();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let subscription = registry.subscribe(move |effects| {
            sink.borrow_mut().extend(effects.iter().cloned());
        });

        let id = registry.open_window(OpenWindowRequest::new("One", "1").with_id("w1"));
        registry.minimize_window(&id);
        assert_eq!(
            *seen.borrow(),
            vec![
                RegistryEffect::Opened(id.clone()),
                RegistryEffect::Minimized(id.clone()),
                RegistryEffect::TrayChanged,
            ]
        );

        assert!(registry.unsubscribe(subscription));
        assert!(!registry.unsubscribe(subscription));
        registry.close_window(&id);
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn unknown_ids_are_silent_noops() {
        let registry = registry();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        registry.subscribe(move |_| counter.set(counter.get() + 1));

        let ghost = WindowId::from("ghost");
        registry.minimize_window(&ghost);
        registry.maximize_window(&ghost);
        registry.restore_window(&ghost);
        registry.close_window(&ghost);

        assert_eq!(calls.get(), 0);
        assert!(registry.windows().is_empty());
    }

    #[test]
    fn listeners_can_read_registry_during_notification() {
        let registry = registry();
        let observed = Rc::new(Cell::new(0));
        let reader = registry.clone();
        let sink = Rc::clone(&observed);
        registry.subscribe(move |_| sink.set(reader.windows().len()));

        registry.open_window(OpenWindowRequest::new("One", "1"));
        assert_eq!(observed.get(), 1);
    }
}
