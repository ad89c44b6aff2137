use super::*;

#[component]
/// Horizontally scrollable strip anchored to the bottom of the viewport.
pub fn TrayList(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <nav
            class=merge_layout_class("ui-tray-list", layout_class)
            aria-label=aria_label
            data-ui-primitive="true"
            data-ui-kind="tray-list"
        >
            {children()}
        </nav>
    }
}

#[component]
/// Tray entry for a minimized window: the title restores, the trailing button closes.
pub fn TrayChip(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(into)] title: MaybeSignal<String>,
    on_restore: Callback<MouseEvent>,
    on_close: Callback<MouseEvent>,
) -> impl IntoView {
    let label = title.clone();
    let close_label = title.clone();
    view! {
        <div
            class=merge_layout_class("ui-tray-chip", layout_class)
            data-ui-primitive="true"
            data-ui-kind="tray-chip"
        >
            <Button
                variant=ButtonVariant::Quiet
                size=ButtonSize::Sm
                ui_slot="tray-restore"
                title=title
                on_click=on_restore
            >
                {move || label.get()}
            </Button>
            <Button
                variant=ButtonVariant::Quiet
                size=ButtonSize::Sm
                ui_slot="tray-close"
                aria_label=Signal::derive(move || format!("Close {}", close_label.get()))
                on_click=on_close
            >
                "\u{00d7}"
            </Button>
        </div>
    }
}
