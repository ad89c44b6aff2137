use leptos::*;
use system_ui::{
    WindowBody, WindowControlButton, WindowControls, WindowFrame, WindowTitle, WindowTitleBar,
};

use crate::{
    content::WindowContent,
    layout::window_frame_rect,
    model::{WindowId, WindowState},
    runtime_context::use_window_manager,
};

fn state_token(state: WindowState) -> &'static str {
    match state {
        WindowState::Normal => "normal",
        WindowState::Minimized => "minimized",
        WindowState::Maximized => "maximized",
    }
}

#[component]
pub(super) fn ManagedWindow(window_id: WindowId, content: WindowContent) -> impl IntoView {
    let manager = use_window_manager();
    let body = content.render(window_id.clone());
    let id = store_value(window_id);

    let snapshot = create_memo(move |_| {
        id.with_value(|id| {
            manager.windows.with(|windows| {
                windows
                    .iter()
                    .find(|window| &window.id == id)
                    .map(|window| (window.title.clone(), window.state))
            })
        })
    });
    let state = move || {
        snapshot
            .get()
            .map(|(_, state)| state)
            .unwrap_or(WindowState::Normal)
    };
    let title = Signal::derive(move || snapshot.get().map(|(title, _)| title).unwrap_or_default());
    let maximized = Signal::derive(move || state() == WindowState::Maximized);
    let frame_style = Signal::derive(move || {
        let sizing = manager.config.with_value(|config| config.frame_sizing());
        match window_frame_rect(state(), manager.viewport.get(), sizing) {
            Some(rect) => rect.to_style(),
            None => "display:none;".to_string(),
        }
    });

    let toggle_maximize = move || {
        id.with_value(|id| {
            if maximized.get_untracked() {
                manager.restore_window(id);
            } else {
                manager.maximize_window(id);
            }
        })
    };

    view! {
        <WindowFrame
            layout_class="wm-window"
            style=frame_style
            aria_label=title
            maximized=maximized
        >
            <div class="wm-window-inner" data-wm-state=move || state_token(state())>
                <WindowTitleBar on_dblclick=Callback::new(move |_| toggle_maximize())>
                    <WindowTitle>{move || title.get()}</WindowTitle>
                    <WindowControls>
                        <WindowControlButton
                            aria_label="Minimize"
                            on_click=Callback::new(move |_| {
                                id.with_value(|id| manager.minimize_window(id))
                            })
                        >
                            "\u{2013}"
                        </WindowControlButton>
                        <WindowControlButton
                            aria_label=Signal::derive(move || {
                                (if maximized.get() { "Restore" } else { "Maximize" }).to_string()
                            })
                            on_click=Callback::new(move |_| toggle_maximize())
                        >
                            {move || if maximized.get() { "\u{2750}" } else { "\u{25a1}" }}
                        </WindowControlButton>
                        <WindowControlButton
                            aria_label="Close"
                            on_click=Callback::new(move |_| {
                                id.with_value(|id| manager.request_close(id))
                            })
                        >
                            "\u{00d7}"
                        </WindowControlButton>
                    </WindowControls>
                </WindowTitleBar>
                <WindowBody>{body}</WindowBody>
            </div>
        </WindowFrame>
    }
}
