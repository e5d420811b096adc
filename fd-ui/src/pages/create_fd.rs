//! Create FD Page
//!
//! The create form with a live maturity estimate. The estimate is local; the
//! figures stored are whatever the server computes on submit.

use leptos::*;
use leptos_router::*;

use fd_manager::api::FdApi;
use fd_manager::display::{format_date, format_inr};
use fd_manager::forms::create_fd::{
    CUSTOMER_NAME, DEPOSIT_AMOUNT, ID_NUMBER, ID_TYPE, INTEREST_RATE, START_DATE, TENURE_UNIT,
    TENURE_VALUE,
};
use fd_manager::forms::{CreateFdForm, Form};
use fd_manager::guard::Route;
use fd_manager::models::{IdType, SystemConfig, Tenure, TenureUnit};
use fd_manager::preview::{compute_preview, Preview, PreviewInputs};

use super::today;
use crate::components::{input_field, select_field, InlineLoading};
use crate::state::{page_scope, AuthContext, GlobalState};

/// Rate the system suggests for the tenure currently typed
fn suggested_rate(form: &CreateFdForm, config: &SystemConfig) -> Option<f64> {
    let value = form.tenure_value.trim().parse::<u32>().ok().filter(|v| *v > 0)?;
    Some(config.default_rate_for(Tenure::new(value, form.tenure_unit)))
}

/// No estimate until the system config (and its interest type) has loaded
fn preview_for(form: &CreateFdForm, config: Option<&SystemConfig>) -> Option<Preview> {
    compute_preview(&PreviewInputs::from_form(form), config?)
}

#[component]
pub fn CreateFd() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let toasts = expect_context::<GlobalState>();
    let navigate = use_navigate();
    let scope = page_scope();

    let form = create_rw_signal(CreateFdForm::new(today(), None));
    let config = create_rw_signal(None::<SystemConfig>);
    let (submitting, set_submitting) = create_signal(false);

    {
        let auth = auth.clone();
        let scope = scope.clone();
        spawn_local(async move {
            let api = auth.api();
            match scope.run(api.get_config()).await {
                Ok(loaded) => {
                    form.update(|f| {
                        if f.interest_rate.trim().is_empty() {
                            f.set_field(INTEREST_RATE, &loaded.default_rate_12m.to_string());
                        }
                    });
                    config.set(Some(loaded));
                }
                Err(e) => auth.report(&e),
            }
        });
    }

    // Recomputed on every keystroke
    let preview = move || config.with(|system| form.with(|f| preview_for(f, system.as_ref())));

    let suggestion = move || {
        let system = config.get()?;
        form.with(|f| suggested_rate(f, &system))
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let Some(Ok(request)) = form.try_update(|f| f.validate()) else {
            return;
        };

        set_submitting.set(true);
        let auth = auth.clone();
        let scope = scope.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let api = auth.api();
            match scope.run(api.create_fd(&request)).await {
                Ok(created) => {
                    toasts.show_success(&format!("{} ({})", created.message, created.fd_no));
                    navigate(&Route::FdDetails(created.fd_no).path(), Default::default());
                }
                Err(e) => {
                    auth.report(&e);
                    if !e.is_cancelled() {
                        set_submitting.set(false);
                    }
                }
            }
        });
    };

    let id_types = IdType::all().iter().map(|t| (t.as_str(), t.as_str())).collect();
    let units = vec![
        (TenureUnit::Months.as_str(), "Months"),
        (TenureUnit::Years.as_str(), "Years"),
    ];

    view! {
        <div class="grid md:grid-cols-3 gap-6">
            <form class="md:col-span-2 bg-gray-800 rounded-lg p-6 space-y-4" on:submit=on_submit>
                <h1 class="text-2xl font-bold">"Create Fixed Deposit"</h1>

                {input_field(form, CUSTOMER_NAME, "Customer name", "text", |f: &CreateFdForm| f.customer_name.clone())}
                <div class="grid grid-cols-2 gap-4">
                    {select_field(form, ID_TYPE, "ID type", id_types, |f: &CreateFdForm| f.id_type.as_str())}
                    {input_field(form, ID_NUMBER, "ID number", "text", |f: &CreateFdForm| f.id_number.clone())}
                </div>
                <div class="grid grid-cols-2 gap-4">
                    {input_field(form, DEPOSIT_AMOUNT, "Deposit amount (₹)", "number", |f: &CreateFdForm| f.deposit_amount.clone())}
                    {input_field(form, INTEREST_RATE, "Interest rate (% p.a.)", "number", |f: &CreateFdForm| f.interest_rate.clone())}
                </div>
                <div class="grid grid-cols-2 gap-4">
                    {input_field(form, TENURE_VALUE, "Tenure", "number", |f: &CreateFdForm| f.tenure_value.clone())}
                    {select_field(form, TENURE_UNIT, "Tenure unit", units, |f: &CreateFdForm| f.tenure_unit.as_str())}
                </div>
                {input_field(form, START_DATE, "Start date", "date", |f: &CreateFdForm| f.start_date.clone())}

                {move || suggestion().map(|rate| view! {
                    <p class="text-sm text-gray-400">
                        {format!("Default rate for this tenure: {}%", rate)}
                        <button
                            type="button"
                            class="ml-2 text-primary-400 hover:underline"
                            on:click=move |_| form.update(|f| f.set_field(INTEREST_RATE, &rate.to_string()))
                        >
                            "Use"
                        </button>
                    </p>
                })}

                <button
                    type="submit"
                    class="px-6 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors disabled:opacity-50"
                    disabled=move || submitting.get()
                >
                    {move || if submitting.get() {
                        view! { <InlineLoading /> }.into_view()
                    } else {
                        "Create FD".into_view()
                    }}
                </button>
            </form>

            <div class="bg-gray-800 rounded-lg p-6 h-fit">
                <h2 class="text-lg font-semibold mb-4">"Maturity preview"</h2>
                {move || match preview() {
                    None => view! {
                        <p class="text-gray-400 text-sm">
                            "Enter amount, rate, tenure and start date to see an estimate."
                        </p>
                    }
                    .into_view(),
                    Some(preview) => view! {
                        <dl class="space-y-3">
                            <div>
                                <dt class="text-sm text-gray-400">"Maturity amount"</dt>
                                <dd class="text-2xl font-bold">{format_inr(preview.maturity_amount)}</dd>
                            </div>
                            <div>
                                <dt class="text-sm text-gray-400">"Interest earned"</dt>
                                <dd>{format_inr(preview.interest_earned)}</dd>
                            </div>
                            <div>
                                <dt class="text-sm text-gray-400">"Maturity date"</dt>
                                <dd>{format_date(preview.maturity_date)}</dd>
                            </div>
                            <div>
                                <dt class="text-sm text-gray-400">"Interest type"</dt>
                                <dd>{preview.interest_type.label()}</dd>
                            </div>
                        </dl>
                        <p class="text-xs text-gray-500 mt-4">
                            "Estimate only. The server computes the final figures."
                        </p>
                    }
                    .into_view(),
                }}
            </div>
        </div>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;
    use chrono::NaiveDate;
    use fd_manager::models::InterestType;

    #[wasm_bindgen_test]
    fn test_suggested_rate_follows_tenure() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let config = SystemConfig::default();
        let mut form = CreateFdForm::new(today, Some(&config));
        assert_eq!(suggested_rate(&form, &config), None);

        form.set_field(TENURE_VALUE, "24");
        assert_eq!(suggested_rate(&form, &config), Some(7.0));

        form.set_field(TENURE_UNIT, "years");
        form.set_field(TENURE_VALUE, "3");
        assert_eq!(suggested_rate(&form, &config), Some(7.5));

        form.set_field(TENURE_VALUE, "0");
        assert_eq!(suggested_rate(&form, &config), None);
    }

    #[wasm_bindgen_test]
    fn test_preview_waits_for_config() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let mut form = CreateFdForm::new(today, None);
        form.set_field(DEPOSIT_AMOUNT, "100000");
        form.set_field(INTEREST_RATE, "7.5");
        form.set_field(TENURE_VALUE, "24");

        assert!(preview_for(&form, None).is_none());

        let config = SystemConfig {
            interest_type: InterestType::Simple,
            ..SystemConfig::default()
        };
        let preview = preview_for(&form, Some(&config)).unwrap();
        assert_eq!(preview.maturity_amount, 115000.00);
        assert_eq!(preview.interest_type, InterestType::Simple);
    }
}
