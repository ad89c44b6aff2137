//! Customer form window: draft-backed create/edit form hosted by the window manager.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod controller;
pub mod model;
pub mod validation;

use leptos::*;
use system_ui::prelude::*;
use window_runtime::{use_window_manager, WindowContent, WindowId};

pub use controller::{
    CloseChoice, CloseDecision, ControllerDeps, ControllerEvent, FormController, FormMode,
};
pub use model::{CustomerField, CustomerFormData, MetadataPair};
pub use validation::{validate_customer, CustomerFormError};

type CustomerController = FormController<CustomerFormData>;

/// Wraps a customer form as window content.
///
/// `on_submit` receives the window id together with the validated snapshot so the caller can
/// persist the customer and close the window.
pub fn customer_form_content(
    mode: FormMode,
    initial: Option<CustomerFormData>,
    on_submit: Callback<(WindowId, CustomerFormData)>,
    loading: Signal<bool>,
) -> WindowContent {
    WindowContent::new(move |window_id| {
        let submitted_id = window_id.clone();
        view! {
            <CustomerFormWindow
                window_id=window_id
                mode=mode
                initial=initial.clone()
                on_submit=Callback::new(move |data| on_submit.call((submitted_id.clone(), data)))
                loading=loading
            />
        }
        .into_view()
    })
}

fn edit_form(
    controller: StoredValue<CustomerController>,
    form: RwSignal<CustomerFormData>,
    edit: impl FnOnce(&mut CustomerFormData),
) {
    let values = controller.with_value(|controller| {
        controller.update(edit);
        controller.values()
    });
    form.set(values);
}

fn submit_label(mode: FormMode, loading: bool) -> &'static str {
    match (mode, loading) {
        (_, true) => "Saving...",
        (FormMode::New, false) => "Add customer",
        (FormMode::Edit, false) => "Update customer",
    }
}

#[component]
/// Customer create/edit form rendered inside a managed window.
///
/// In [`FormMode::New`] the form restores the draft stored under `window_id` and autosaves
/// while the user types. Closing the window with unsaved changes asks whether to keep a draft.
pub fn CustomerFormWindow(
    /// Owning window id; also the draft key.
    #[prop(into)]
    window_id: WindowId,
    /// Create or edit.
    #[prop(default = FormMode::New)]
    mode: FormMode,
    /// Pre-filled values (the record being edited, or defaults for a new form).
    #[prop(default = None)]
    initial: Option<CustomerFormData>,
    /// Receives the validated snapshot. Closing the window is the caller's decision.
    on_submit: Callback<CustomerFormData>,
    /// Disables submit and shows a busy label while the caller is saving.
    #[prop(optional, into)]
    loading: MaybeSignal<bool>,
) -> impl IntoView {
    let manager = use_window_manager();
    let loading = Signal::derive(move || loading.get());
    let config = manager.config();
    let initial = match mode {
        FormMode::New => initial.unwrap_or_default(),
        FormMode::Edit => initial.unwrap_or_default().for_editing(),
    };
    let deps = ControllerDeps {
        drafts: manager.draft_store(),
        timers: manager.timer_service(),
        debounce: config.autosave_debounce(),
        notice: config.draft_saved_notice(),
    };
    let controller = store_value(FormController::new(
        window_id.as_str(),
        mode,
        initial.clone(),
        deps,
    ));

    let form = create_rw_signal(initial);
    let draft_notice = create_rw_signal(false);
    let error = create_rw_signal::<Option<CustomerFormError>>(None);
    let prompt_open = create_rw_signal(false);

    controller.with_value(|controller| {
        controller.set_listener(move |event| {
            let saved = event == ControllerEvent::DraftSaved;
            draft_notice.set(saved);
            if saved {
                manager.notify_drafts_changed();
            }
        });
    });

    if mode == FormMode::New {
        let loader = controller.get_value();
        spawn_local(async move {
            if loader.load().await {
                form.set(loader.values());
            }
        });
    }

    let guard_id = window_id.clone();
    manager.set_close_guard(
        window_id.clone(),
        Callback::new(move |()| {
            match controller.with_value(|controller| controller.request_close()) {
                CloseDecision::CloseNow => manager.close_window(&guard_id),
                CloseDecision::Prompt => prompt_open.set(true),
            }
        }),
    );

    let cleanup_id = window_id.clone();
    on_cleanup(move || {
        controller.try_with_value(|controller| controller.dispose());
        manager.clear_close_guard(&cleanup_id);
    });

    let choice_id = window_id.clone();
    let resolve_close = Callback::new(move |choice: CloseChoice| {
        prompt_open.set(false);
        let controller = controller.get_value();
        let window_id = choice_id.clone();
        spawn_local(async move {
            if controller.resolve_close(choice).await {
                manager.notify_drafts_changed();
                manager.close_window(&window_id);
            }
        });
    });

    let on_form_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        let controller = controller.get_value();
        spawn_local(async move {
            match controller.submit(validate_customer).await {
                Ok(snapshot) => {
                    error.set(None);
                    on_submit.call(snapshot);
                }
                Err(err) => error.set(Some(err)),
            }
        });
    };

    let text_value =
        move |field: CustomerField| Signal::derive(move || form.with(|d| d.field(field)));
    let text_input = move |field: CustomerField| {
        Callback::new(move |value: String| {
            edit_form(controller, form, |data| data.set_field(field, &value));
        })
    };
    let pair_count = move || form.with(|data| data.metadata_pairs.len());

    view! {
        <form class="customer-form" on:submit=on_form_submit novalidate=true>
            <Stack>
                <Show when=move || draft_notice.get()>
                    <Notice tone=TextTone::Success>"Draft saved"</Notice>
                </Show>

                <FieldSet title="Contact">
                    <FieldGroup title="Name" required=true>
                        <TextField
                            aria_label="Name"
                            placeholder="Full name"
                            value=text_value(CustomerField::Name)
                            on_input=text_input(CustomerField::Name)
                        />
                    </FieldGroup>
                    <FieldGroup title="Phone" required=true>
                        <TextField
                            aria_label="Phone"
                            placeholder="Phone"
                            input_type="tel"
                            value=text_value(CustomerField::Phone)
                            on_input=text_input(CustomerField::Phone)
                        />
                    </FieldGroup>
                    <FieldGroup title="Mobile">
                        <TextField
                            aria_label="Mobile"
                            placeholder="Mobile (optional)"
                            input_type="tel"
                            value=text_value(CustomerField::Mobile)
                            on_input=text_input(CustomerField::Mobile)
                        />
                    </FieldGroup>
                    <FieldGroup title="Gender">
                        <SelectField
                            aria_label="Gender"
                            options=model::Gender::OPTIONS.to_vec()
                            value=text_value(CustomerField::Gender)
                            on_change=text_input(CustomerField::Gender)
                        />
                    </FieldGroup>
                </FieldSet>

                <FieldSet title="Enquiry">
                    <FieldGroup title="Purpose">
                        <SelectField
                            aria_label="Purpose"
                            options=model::PURPOSE_OPTIONS.to_vec()
                            value=text_value(CustomerField::Purpose)
                            on_change=text_input(CustomerField::Purpose)
                        />
                    </FieldGroup>
                    <FieldGroup title="Source">
                        <SelectField
                            aria_label="Source"
                            options=model::SOURCE_OPTIONS.to_vec()
                            value=text_value(CustomerField::Source)
                            on_change=text_input(CustomerField::Source)
                        />
                    </FieldGroup>
                    <FieldGroup title="Department">
                        <SelectField
                            aria_label="Department"
                            options=model::DEPARTMENT_OPTIONS.to_vec()
                            value=text_value(CustomerField::Department)
                            on_change=text_input(CustomerField::Department)
                        />
                    </FieldGroup>
                    <FieldGroup title="Priority">
                        <SelectField
                            aria_label="Priority"
                            options=model::Priority::OPTIONS.to_vec()
                            value=text_value(CustomerField::Priority)
                            on_change=text_input(CustomerField::Priority)
                        />
                    </FieldGroup>
                    <FieldGroup title="Type">
                        <SelectField
                            aria_label="Type"
                            options=model::CustomerType::OPTIONS.to_vec()
                            value=text_value(CustomerField::CustomerType)
                            on_change=text_input(CustomerField::CustomerType)
                        />
                    </FieldGroup>
                    <FieldGroup title="Referred to">
                        <TextField
                            aria_label="Referred to"
                            value=text_value(CustomerField::ReferredTo)
                            on_input=text_input(CustomerField::ReferredTo)
                        />
                    </FieldGroup>
                    <FieldGroup title="Remark">
                        <TextArea
                            aria_label="Remark"
                            rows=3
                            value=text_value(CustomerField::Remark)
                            on_input=text_input(CustomerField::Remark)
                        />
                    </FieldGroup>
                </FieldSet>

                <FieldSet title="Custom fields">
                    <For each=move || 0..pair_count() key=|index| *index let:index>
                        <Cluster>
                            <TextField
                                aria_label="Field name"
                                placeholder="Field"
                                value=Signal::derive(move || {
                                    form.with(|d| {
                                        d.metadata_pairs
                                            .get(index)
                                            .map(|pair| pair.key.clone())
                                            .unwrap_or_default()
                                    })
                                })
                                on_input=Callback::new(move |key: String| {
                                    edit_form(controller, form, |data| {
                                        data.update_metadata_pair(index, Some(&key), None);
                                    });
                                })
                            />
                            <TextField
                                aria_label="Field value"
                                placeholder="Value"
                                value=Signal::derive(move || {
                                    form.with(|d| {
                                        d.metadata_pairs
                                            .get(index)
                                            .map(|pair| pair.value.clone())
                                            .unwrap_or_default()
                                    })
                                })
                                on_input=Callback::new(move |value: String| {
                                    edit_form(controller, form, |data| {
                                        data.update_metadata_pair(index, None, Some(&value));
                                    });
                                })
                            />
                            <Button
                                variant=ButtonVariant::Quiet
                                size=ButtonSize::Sm
                                aria_label="Remove field"
                                on_click=Callback::new(move |_| {
                                    edit_form(controller, form, |data| {
                                        data.remove_metadata_pair(index);
                                    });
                                })
                            >
                                "Remove"
                            </Button>
                        </Cluster>
                    </For>
                    <Button
                        variant=ButtonVariant::Quiet
                        size=ButtonSize::Sm
                        on_click=Callback::new(move |_| {
                            edit_form(controller, form, |data| data.add_metadata_pair());
                        })
                    >
                        "Add field"
                    </Button>
                </FieldSet>

                <Cluster end=true>
                    <Button
                        variant=ButtonVariant::Primary
                        submit=true
                        disabled=loading
                        busy=loading
                    >
                        {move || submit_label(mode, loading.get())}
                    </Button>
                </Cluster>
            </Stack>

            <Show when=move || error.with(Option::is_some)>
                <Modal title="Cannot save customer">
                    <Stack>
                        <Notice tone=TextTone::Danger assertive=true>
                            {move || error.get().map(|err| err.to_string()).unwrap_or_default()}
                        </Notice>
                        <Cluster end=true>
                            <Button
                                variant=ButtonVariant::Primary
                                on_click=Callback::new(move |_| error.set(None))
                            >
                                "OK"
                            </Button>
                        </Cluster>
                    </Stack>
                </Modal>
            </Show>

            <Show when=move || prompt_open.get()>
                <Modal title="Unsaved changes">
                    <Stack>
                        <p>"You have unsaved changes. Keep them as a draft before closing?"</p>
                        <Cluster end=true>
                            <Button
                                variant=ButtonVariant::Danger
                                on_click=Callback::new(move |_| resolve_close.call(CloseChoice::Discard))
                            >
                                "Discard"
                            </Button>
                            <Button
                                variant=ButtonVariant::Primary
                                on_click=Callback::new(move |_| resolve_close.call(CloseChoice::SaveDraft))
                            >
                                "Save draft"
                            </Button>
                            <Button on_click=Callback::new(move |_| resolve_close.call(CloseChoice::Cancel))>
                                "Cancel"
                            </Button>
                        </Cluster>
                    </Stack>
                </Modal>
            </Show>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_label_follows_mode_and_loading() {
        assert_eq!(submit_label(FormMode::New, false), "Add customer");
        assert_eq!(submit_label(FormMode::Edit, false), "Update customer");
        assert_eq!(submit_label(FormMode::Edit, true), "Saving...");
    }
}
