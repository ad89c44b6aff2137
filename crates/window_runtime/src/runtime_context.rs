//! Provider and context wiring for the window manager.
//!
//! The provider owns the registry service, mirrors its windows into a signal for rendering, and
//! exposes the draft store, timers, and configuration to window content.

use std::{collections::HashMap, rc::Rc};

use form_drafts::DraftStore;
use leptos::*;
use platform_host::{HostServices, TimerService};

use crate::{
    config::WindowManagerConfig,
    content::WindowContent,
    layout::Viewport,
    model::{OpenWindowRequest, WindowId, WindowRecord},
    registry::{SubscriptionId, WindowRegistry},
};

#[derive(Clone, Copy)]
/// Leptos context for reading window state and driving the registry.
pub struct WindowManagerContext {
    /// Registry service owning all window records.
    pub registry: StoredValue<WindowRegistry<WindowContent>>,
    /// Reactive mirror of the registry, refreshed on every change notification.
    pub windows: RwSignal<Vec<WindowRecord<WindowContent>>>,
    /// Current viewport size used for frame layout.
    pub viewport: RwSignal<Viewport>,
    /// Draft store shared by form windows.
    pub drafts: StoredValue<DraftStore>,
    /// Timer service for debounced saves and transient notices.
    pub timers: StoredValue<Rc<dyn TimerService>>,
    /// Active configuration.
    pub config: StoredValue<WindowManagerConfig>,
    /// Bumped whenever window content writes or deletes a draft.
    pub drafts_revision: RwSignal<u64>,
    close_guards: StoredValue<HashMap<WindowId, Callback<()>>>,
    subscription: SubscriptionId,
}

impl WindowManagerContext {
    /// Builds the context and starts mirroring the registry into [`Self::windows`].
    ///
    /// Must run inside a reactive runtime; call [`Self::detach`] when the owner is cleaned up.
    pub fn new(host_services: &HostServices, config: WindowManagerConfig) -> Self {
        let registry = WindowRegistry::<WindowContent>::new(config.window_id_prefix.clone());
        let drafts = DraftStore::new(
            Rc::clone(&host_services.kv_store),
            config.draft_keys.clone(),
        );
        let windows = create_rw_signal(Vec::new());
        let subscription = {
            let reader = registry.clone();
            registry.subscribe(move |_| windows.set(reader.windows()))
        };

        Self {
            registry: store_value(registry),
            windows,
            viewport: create_rw_signal(current_viewport()),
            drafts: store_value(drafts),
            timers: store_value(Rc::clone(&host_services.timers)),
            config: store_value(config),
            drafts_revision: create_rw_signal(0),
            close_guards: store_value(HashMap::new()),
            subscription,
        }
    }

    /// Stops mirroring registry changes into the windows signal.
    pub fn detach(&self) {
        let subscription = self.subscription;
        self.registry.try_with_value(|registry| {
            registry.unsubscribe(subscription);
        });
    }

    /// Opens a window (or brings back the open one with the same id).
    pub fn open_window(&self, request: OpenWindowRequest<WindowContent>) -> WindowId {
        self.registry.with_value(|registry| registry.open_window(request))
    }

    /// Closes a window immediately, bypassing any close guard.
    pub fn close_window(&self, window_id: &WindowId) {
        self.close_guards.update_value(|guards| {
            guards.remove(window_id);
        });
        self.registry
            .with_value(|registry| registry.close_window(window_id));
    }

    /// Asks a window to close. Windows with a close guard decide for themselves; others close.
    pub fn request_close(&self, window_id: &WindowId) {
        let guard = self
            .close_guards
            .with_value(|guards| guards.get(window_id).copied());
        match guard {
            Some(guard) => {
                // The guard may need to show a prompt inside the window body.
                let minimized = self
                    .registry
                    .with_value(|registry| registry.window(window_id))
                    .is_some_and(|window| window.is_minimized());
                if minimized {
                    self.restore_window(window_id);
                }
                guard.call(());
            }
            None => self.close_window(window_id),
        }
    }

    /// Moves a window into the tray.
    pub fn minimize_window(&self, window_id: &WindowId) {
        self.registry
            .with_value(|registry| registry.minimize_window(window_id));
    }

    /// Expands a window to fill the viewport.
    pub fn maximize_window(&self, window_id: &WindowId) {
        self.registry
            .with_value(|registry| registry.maximize_window(window_id));
    }

    /// Returns a window to its normal panel.
    pub fn restore_window(&self, window_id: &WindowId) {
        self.registry
            .with_value(|registry| registry.restore_window(window_id));
    }

    /// Routes close requests for `window_id` through `guard` until the window closes.
    pub fn set_close_guard(&self, window_id: WindowId, guard: Callback<()>) {
        self.close_guards.update_value(|guards| {
            guards.insert(window_id, guard);
        });
    }

    /// Removes a close guard.
    pub fn clear_close_guard(&self, window_id: &WindowId) {
        self.close_guards.update_value(|guards| {
            guards.remove(window_id);
        });
    }

    /// Minimized windows, most recently minimized first.
    pub fn minimized_windows(&self) -> Vec<WindowRecord<WindowContent>> {
        self.registry
            .with_value(|registry| registry.minimized_windows())
    }

    /// Shared draft store handle.
    pub fn draft_store(&self) -> DraftStore {
        self.drafts.get_value()
    }

    /// Shared timer service handle.
    pub fn timer_service(&self) -> Rc<dyn TimerService> {
        self.timers.get_value()
    }

    /// Active configuration snapshot.
    pub fn config(&self) -> WindowManagerConfig {
        self.config.get_value()
    }

    /// Signals draft listeners that the stored drafts changed.
    pub fn notify_drafts_changed(&self) {
        self.drafts_revision.update(|revision| *revision = revision.wrapping_add(1));
    }
}

pub(crate) fn current_viewport() -> Viewport {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let read = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
                value.ok().and_then(|value| value.as_f64()).map(|value| value as i32)
            };
            let fallback = Viewport::default();
            return Viewport {
                width: read(window.inner_width()).unwrap_or(fallback.width),
                height: read(window.inner_height()).unwrap_or(fallback.height),
            };
        }
    }

    Viewport::default()
}

#[component]
/// Provides [`WindowManagerContext`] to descendant components.
pub fn WindowManagerProvider(
    /// Host service bundle assembled by the entry layer.
    host_services: HostServices,
    /// Configuration override. Defaults to the bundled `window_manager.toml`.
    #[prop(optional)]
    config: Option<WindowManagerConfig>,
    children: Children,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let debounce_ms = config.autosave_debounce_ms;
    let context = WindowManagerContext::new(&host_services, config);
    on_cleanup(move || context.detach());

    let viewport = context.viewport;
    let resize_listener = window_event_listener(ev::resize, move |_| {
        viewport.set(current_viewport());
    });
    on_cleanup(move || resize_listener.remove());

    logging::log!(
        "[window_runtime] window manager ready (drafts: {}, debounce: {} ms)",
        host_services.storage_backend.as_str(),
        debounce_ms
    );

    provide_context(context);

    children().into_view()
}

/// Returns the current [`WindowManagerContext`].
///
/// # Panics
///
/// Panics if called outside [`WindowManagerProvider`].
pub fn use_window_manager() -> WindowManagerContext {
    use_context::<WindowManagerContext>().expect("WindowManagerContext not provided")
}
