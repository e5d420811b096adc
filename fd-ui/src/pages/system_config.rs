//! System Configuration Page (supervisors)

use leptos::*;

use fd_manager::api::FdApi;
use fd_manager::forms::system_config::{
    DEFAULT_RATE_12M, DEFAULT_RATE_24M, DEFAULT_RATE_36M, INTEREST_TYPE, PENALTY_PERCENT,
};
use fd_manager::forms::{Form, SystemConfigForm};
use fd_manager::models::{InterestType, SystemConfigUpdate};

use crate::components::{input_field, select_field, InlineLoading, LoadFailed, Loading};
use crate::state::{page_scope, AuthContext, GlobalState, Load};

#[component]
pub fn SystemConfigPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let toasts = expect_context::<GlobalState>();
    let scope = page_scope();
    let form = create_rw_signal(Load::<SystemConfigForm>::Loading);
    let (saving, set_saving) = create_signal(false);

    {
        let auth = auth.clone();
        let scope = scope.clone();
        spawn_local(async move {
            let api = auth.api();
            let result = scope.run(api.get_config()).await;
            auth.settle(form, result.map(|config| SystemConfigForm::from_config(&config)));
        });
    }

    view! {
        <div class="max-w-2xl space-y-6">
            <h1 class="text-2xl font-bold">"System Configuration"</h1>
            {move || match form.get() {
                Load::Loading => view! { <Loading /> }.into_view(),
                Load::Failed(message) => view! { <LoadFailed message=message /> }.into_view(),
                Load::Ready(loaded) => {
                    let auth = auth.clone();
                    let scope = scope.clone();
                    view! {
                        <ConfigEditor
                            initial=loaded
                            saving=saving
                            on_save=move |update| {
                                let auth = auth.clone();
                                let scope = scope.clone();
                                set_saving.set(true);
                                spawn_local(async move {
                                    let api = auth.api();
                                    match scope.run(api.update_config(&update)).await {
                                        Ok(done) => {
                                            let message = if done.updated_fields.is_empty() {
                                                done.message
                                            } else {
                                                format!("{} ({})", done.message, done.updated_fields.join(", "))
                                            };
                                            toasts.show_success(&message);
                                        }
                                        Err(e) => auth.report(&e),
                                    }
                                    set_saving.set(false);
                                });
                            }
                        />
                    }
                    .into_view()
                }
            }}
        </div>
    }
}

#[component]
fn ConfigEditor<F>(initial: SystemConfigForm, saving: ReadSignal<bool>, on_save: F) -> impl IntoView
where
    F: Fn(SystemConfigUpdate) + 'static,
{
    let form = create_rw_signal(initial);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if let Some(Ok(update)) = form.try_update(|f| f.validate()) {
            on_save(update);
        }
    };

    let interest_types = vec![
        (InterestType::Simple.as_str(), InterestType::Simple.label()),
        (InterestType::Compound.as_str(), InterestType::Compound.label()),
    ];

    view! {
        <form class="bg-gray-800 rounded-lg p-6 space-y-4" on:submit=on_submit>
            {select_field(form, INTEREST_TYPE, "Interest type", interest_types, |f: &SystemConfigForm| f.interest_type.as_str())}
            <p class="text-xs text-gray-500">{move || form.with(|f| f.interest_type.formula())}</p>
            {input_field(form, PENALTY_PERCENT, "Premature closure penalty (%)", "number", |f: &SystemConfigForm| f.penalty_percent.clone())}
            <div class="grid grid-cols-3 gap-4">
                {input_field(form, DEFAULT_RATE_12M, "Default rate, 12 months (%)", "number", |f: &SystemConfigForm| f.default_rate_12m.clone())}
                {input_field(form, DEFAULT_RATE_24M, "Default rate, 24 months (%)", "number", |f: &SystemConfigForm| f.default_rate_24m.clone())}
                {input_field(form, DEFAULT_RATE_36M, "Default rate, 36 months (%)", "number", |f: &SystemConfigForm| f.default_rate_36m.clone())}
            </div>
            <button
                type="submit"
                class="px-6 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors disabled:opacity-50"
                disabled=move || saving.get()
            >
                {move || if saving.get() {
                    view! { <InlineLoading /> }.into_view()
                } else {
                    "Save".into_view()
                }}
            </button>
        </form>
    }
}
