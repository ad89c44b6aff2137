use super::*;

#[component]
/// Blocking dialog rendered above the window layer.
pub fn Modal(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(into)] title: String,
    #[prop(optional, into)] aria_label: Option<String>,
    children: Children,
) -> impl IntoView {
    let aria_label = aria_label.unwrap_or_else(|| title.clone());
    view! {
        <div class="ui-modal-backdrop" data-ui-primitive="true" data-ui-kind="modal-backdrop">
            <div
                class=merge_layout_class("ui-modal", layout_class)
                role="alertdialog"
                aria-modal="true"
                aria-label=aria_label
                data-ui-primitive="true"
                data-ui-kind="modal"
            >
                <div data-ui-slot="title">{title}</div>
                <div data-ui-slot="body">{children()}</div>
            </div>
        </div>
    }
}

#[component]
/// Inline status or error banner.
pub fn Notice(
    #[prop(default = TextTone::Secondary)] tone: TextTone,
    #[prop(optional)] layout_class: Option<&'static str>,
    /// Announce immediately (`role="alert"`) instead of politely.
    #[prop(optional)]
    assertive: bool,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class=merge_layout_class("ui-notice", layout_class)
            role=if assertive { "alert" } else { "status" }
            data-ui-primitive="true"
            data-ui-kind="notice"
            data-ui-tone=tone.token()
        >
            {children()}
        </div>
    }
}
