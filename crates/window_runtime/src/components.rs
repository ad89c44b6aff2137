//! Window overlay and tray composition.

mod tray;
mod window;

use leptos::*;
use system_ui::WindowLayer;

use self::{tray::MinimizedTray, window::ManagedWindow};
use crate::runtime_context::use_window_manager;

#[component]
/// Renders every open window plus the minimized tray.
///
/// Minimized windows stay mounted (hidden) so their content keeps in-progress state; only
/// closing a window unmounts it.
pub fn WindowManagerSurface() -> impl IntoView {
    let manager = use_window_manager();
    let open_windows = move || {
        manager.windows.with(|windows| {
            windows
                .iter()
                .map(|window| (window.id.clone(), window.content.clone()))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <WindowLayer>
            <For
                each=open_windows
                key=|(window_id, _)| window_id.clone()
                children=move |(window_id, content)| {
                    view! { <ManagedWindow window_id content /> }
                }
            />
        </WindowLayer>
        <MinimizedTray />
    }
}
