use leptos::*;
use system_ui::{TrayChip, TrayList};

use crate::{
    model::{tray_order, WindowId, WindowRecord},
    runtime_context::use_window_manager,
};

/// `(id, title)` pairs for minimized windows, most recently minimized first.
fn tray_entries<C>(windows: &[WindowRecord<C>]) -> Vec<(WindowId, String)> {
    tray_order(windows)
        .into_iter()
        .map(|window| (window.id.clone(), window.title.clone()))
        .collect()
}

#[component]
pub(super) fn MinimizedTray() -> impl IntoView {
    let manager = use_window_manager();
    let entries = create_memo(move |_| manager.windows.with(|windows| tray_entries(windows)));

    view! {
        <Show when=move || entries.with(|entries| !entries.is_empty())>
            <TrayList layout_class="wm-tray" aria_label="Minimized windows">
                <For
                    each=move || entries.get()
                    key=|(window_id, _)| window_id.clone()
                    children=move |(window_id, title)| {
                        let id = store_value(window_id);
                        view! {
                            <TrayChip
                                title=title
                                on_restore=Callback::new(move |_| {
                                    id.with_value(|id| manager.restore_window(id))
                                })
                                on_close=Callback::new(move |_| {
                                    id.with_value(|id| manager.request_close(id))
                                })
                            />
                        }
                    }
                />
            </TrayList>
        </Show>
    }
}
