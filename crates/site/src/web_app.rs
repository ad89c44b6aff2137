use crm_app_customer_form::{customer_form_content, CustomerFormData, FormMode};
use form_drafts::DraftRecord;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use platform_host_web::build_host_services;
use system_ui::prelude::*;
use window_runtime::{
    use_window_manager, OpenWindowRequest, WindowId, WindowManagerConfig, WindowManagerProvider,
    WindowManagerSurface,
};

const NEW_CUSTOMER_ID_PREFIX: &str = "customer-new";

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="School CRM" />
        <Meta name="description" content="Customer enquiries with windowed, draft-preserving forms." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=CustomersEntry />
                    <Route path="/customers" view=CustomersEntry />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
pub fn CustomersEntry() -> impl IntoView {
    let config = WindowManagerConfig::default();
    let host_services = build_host_services(config.storage_backend);

    view! {
        <WindowManagerProvider host_services=host_services config=config>
            <CustomersScreen />
            <WindowManagerSurface />
        </WindowManagerProvider>
    }
}

/// Inserts a new customer (assigning the next id) or replaces the one with the same id.
fn upsert_customer(
    customers: &mut Vec<CustomerFormData>,
    next_id: &mut u64,
    mut data: CustomerFormData,
) -> u64 {
    let id = match data.id {
        Some(id) => id,
        None => {
            *next_id = next_id.saturating_add(1);
            *next_id
        }
    };
    data.id = Some(id);
    match customers.iter_mut().find(|existing| existing.id == Some(id)) {
        Some(existing) => *existing = data,
        None => customers.push(data),
    }
    id
}

fn customer_ids(customers: &[CustomerFormData]) -> Vec<u64> {
    customers.iter().filter_map(|customer| customer.id).collect()
}

fn customer_by_id(customers: &[CustomerFormData], id: u64) -> Option<CustomerFormData> {
    customers
        .iter()
        .find(|customer| customer.id == Some(id))
        .cloned()
}

fn draft_title(record: &DraftRecord) -> String {
    let name = record
        .form_data
        .get("name")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .unwrap_or_default();
    if name.is_empty() {
        "Untitled customer".to_string()
    } else {
        name.to_string()
    }
}

#[component]
fn CustomersScreen() -> impl IntoView {
    let manager = use_window_manager();
    let customers = create_rw_signal(Vec::<CustomerFormData>::new());
    let next_id = store_value(0_u64);
    let saving = create_rw_signal(false);
    let drafts = create_rw_signal(Vec::<DraftRecord>::new());

    let refresh_drafts = move || {
        let store = manager.draft_store();
        spawn_local(async move {
            drafts.set(store.get_all_drafts().await);
        });
    };

    // Drafts change on autosave, on close, and when windows open or close.
    create_effect(move |_| {
        manager.windows.with(|_| ());
        let _ = manager.drafts_revision.get();
        refresh_drafts();
    });

    let on_submit = Callback::new(move |(window_id, data): (WindowId, CustomerFormData)| {
        saving.set(true);
        let mut id = 0;
        next_id.update_value(|next_id| {
            customers.update(|list| id = upsert_customer(list, next_id, data));
        });
        logging::log!("[site] saved customer {id} from window {window_id}");
        saving.set(false);
        manager.close_window(&window_id);
    });
    let loading = Signal::derive(move || saving.get());

    let open_new = move |window_id: Option<String>| {
        let content = customer_form_content(FormMode::New, None, on_submit, loading);
        let request = OpenWindowRequest::new("New Customer", content);
        let request = match window_id {
            Some(id) => request.with_id(id),
            None => request.with_id_prefix(NEW_CUSTOMER_ID_PREFIX),
        };
        manager.open_window(request);
    };

    let open_edit = move |customer: CustomerFormData| {
        let Some(id) = customer.id else {
            return;
        };
        let title = format!("Edit {}", customer.name);
        let content = customer_form_content(FormMode::Edit, Some(customer), on_submit, loading);
        manager.open_window(
            OpenWindowRequest::new(title, content).with_id(format!("customer-edit-{id}")),
        );
    };

    let clear_drafts = move |_| {
        let store = manager.draft_store();
        spawn_local(async move {
            store.clear_all_drafts().await;
            drafts.set(store.get_all_drafts().await);
        });
    };

    view! {
        <section class="crm-customers">
            <Stack>
                <Cluster>
                    <h1>"Customers"</h1>
                    <Button
                        variant=ButtonVariant::Primary
                        on_click=Callback::new(move |_| open_new(None))
                    >
                        "New customer"
                    </Button>
                </Cluster>

                <Show
                    when=move || customers.with(|list| !list.is_empty())
                    fallback=|| view! { <p class="crm-empty">"No customers yet."</p> }
                >
                    <table class="crm-customer-table">
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th>"Phone"</th>
                                <th>"Priority"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || customers.with(|list| customer_ids(list))
                                key=|id| *id
                                let:id
                            >
                                {
                                    let row = move || customers.with(|list| customer_by_id(list, id));
                                    let cell = move |read: fn(&CustomerFormData) -> String| {
                                        move || row().map(|customer| read(&customer)).unwrap_or_default()
                                    };
                                    view! {
                                        <tr>
                                            <td>{cell(|customer| customer.name.clone())}</td>
                                            <td>{cell(|customer| customer.phone.clone())}</td>
                                            <td>{cell(|customer| customer.priority.token().to_string())}</td>
                                            <td>
                                                <Button
                                                    size=ButtonSize::Sm
                                                    on_click=Callback::new(move |_| {
                                                        let current = customers
                                                            .with_untracked(|list| customer_by_id(list, id));
                                                        if let Some(customer) = current {
                                                            open_edit(customer);
                                                        }
                                                    })
                                                >
                                                    "Edit"
                                                </Button>
                                            </td>
                                        </tr>
                                    }
                                }
                            </For>
                        </tbody>
                    </table>
                </Show>

                <FieldSet title="Saved drafts">
                    <Show
                        when=move || drafts.with(|list| !list.is_empty())
                        fallback=|| view! { <p class="crm-empty">"No drafts."</p> }
                    >
                        <ul class="crm-draft-list">
                            <For
                                each=move || drafts.get()
                                key=|record| (record.id.clone(), record.timestamp)
                                let:record
                            >
                                {
                                    let resume_id = record.id.clone();
                                    view! {
                                        <li>
                                            <Cluster>
                                                <span>{draft_title(&record)}</span>
                                                <Button
                                                    size=ButtonSize::Sm
                                                    on_click=Callback::new(move |_| open_new(Some(resume_id.clone())))
                                                >
                                                    "Resume"
                                                </Button>
                                            </Cluster>
                                        </li>
                                    }
                                }
                            </For>
                        </ul>
                        <Button variant=ButtonVariant::Danger size=ButtonSize::Sm on_click=Callback::new(clear_drafts)>
                            "Clear drafts"
                        </Button>
                    </Show>
                </FieldSet>
            </Stack>
        </section>
    }
}
