//! FD Details Page
//!
//! One account with its lifecycle actions: premature closure (simulate,
//! then confirm), marking as matured, and the PDF receipt.

use chrono::NaiveDate;
use leptos::*;
use std::rc::Rc;
use wasm_bindgen::JsCast;

use fd_manager::api::{FdApi, RequestScope};
use fd_manager::closure::{ClosureDraft, ClosureError};
use fd_manager::display::{format_date, format_inr, format_percent};
use fd_manager::models::{receipt_file_name, ClosureSimulation, FdAccount};

use super::today;
use crate::components::{InlineLoading, LoadFailed, Loading, StatusBadge};
use crate::state::{page_scope, AuthContext, GlobalState, Load};

/// Hand the receipt bytes to the browser as a file download
fn save_receipt(fd_no: &str, bytes: &[u8]) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document")?;

    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/pdf");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|_| "Could not create file")?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Could not create download link")?;

    let anchor = document
        .create_element("a")
        .ok()
        .and_then(|a| a.dyn_into::<web_sys::HtmlAnchorElement>().ok())
        .ok_or("Could not create download link")?;
    anchor.set_href(&url);
    anchor.set_download(&receipt_file_name(fd_no));
    anchor.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[component]
pub fn FdDetails(fd_no: String) -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let scope = page_scope();
    let fd = create_rw_signal(Load::<FdAccount>::Loading);
    let fd_no = Rc::new(fd_no);

    // Also used after every action to pick up the new status
    let load = {
        let auth = auth.clone();
        let scope = scope.clone();
        let fd_no = Rc::clone(&fd_no);
        move || {
            let auth = auth.clone();
            let scope = scope.clone();
            let fd_no = Rc::clone(&fd_no);
            spawn_local(async move {
                let api = auth.api();
                let result = scope.run(api.get_fd(&fd_no)).await;
                auth.settle(fd, result);
            });
        }
    };
    load();
    let reload: Rc<dyn Fn()> = Rc::new(load);

    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">{format!("FD {}", fd_no)}</h1>
            {move || match fd.get() {
                Load::Loading => view! { <Loading /> }.into_view(),
                Load::Failed(message) => view! { <LoadFailed message=message /> }.into_view(),
                Load::Ready(account) => {
                    let reload = Rc::clone(&reload);
                    view! {
                        <Summary fd=account.clone() />
                        <Actions fd=account.clone() scope=scope.clone() reload=reload.clone() />
                        {account.can_simulate().then(|| view! {
                            <ClosurePanel fd=account scope=scope.clone() reload=reload />
                        })}
                    }
                    .into_view()
                }
            }}
        </div>
    }
}

#[component]
fn Summary(fd: FdAccount) -> impl IntoView {
    let rows = vec![
        ("Customer", fd.customer_name.clone()),
        ("ID", format!("{} {}", fd.id_type, fd.id_number)),
        ("Deposit amount", format_inr(fd.deposit_amount)),
        ("Interest rate", format_percent(fd.interest_rate)),
        ("Tenure", fd.tenure_label()),
        (
            "Interest type",
            fd.interest_type.map(|t| t.label().to_string()).unwrap_or_else(|| "-".to_string()),
        ),
        ("Start date", format_date(fd.start_date)),
        ("Maturity date", format_date(fd.maturity_date)),
        ("Maturity amount", format_inr(fd.maturity_amount)),
        ("Created by", fd.created_by.clone().unwrap_or_else(|| "-".to_string())),
        ("Closed at", fd.closed_at.clone().unwrap_or_else(|| "-".to_string())),
    ];

    view! {
        <div class="bg-gray-800 rounded-lg p-6">
            <div class="flex items-center justify-between mb-4">
                <h2 class="text-lg font-semibold">"Details"</h2>
                <StatusBadge status=fd.status />
            </div>
            <dl class="grid grid-cols-2 md:grid-cols-3 gap-4">
                {rows
                    .into_iter()
                    .map(|(label, value)| view! {
                        <div>
                            <dt class="text-sm text-gray-400">{label}</dt>
                            <dd>{value}</dd>
                        </div>
                    })
                    .collect_view()}
            </dl>
        </div>
    }
}

/// Receipt download and, once due, the mature action
#[component]
fn Actions(fd: FdAccount, scope: RequestScope, reload: Rc<dyn Fn()>) -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let toasts = expect_context::<GlobalState>();
    let (busy, set_busy) = create_signal(false);
    let can_mature = fd.can_mature(today());
    let fd_no = Rc::new(fd.fd_no);

    let download = {
        let auth = auth.clone();
        let scope = scope.clone();
        let fd_no = Rc::clone(&fd_no);
        move |_| {
            let auth = auth.clone();
            let scope = scope.clone();
            let fd_no = Rc::clone(&fd_no);
            set_busy.set(true);
            spawn_local(async move {
                let api = auth.api();
                match scope.run(api.download_receipt(&fd_no)).await {
                    Ok(bytes) => match save_receipt(&fd_no, &bytes) {
                        Ok(()) => toasts.show_success("Receipt downloaded"),
                        Err(e) => toasts.show_error(&e),
                    },
                    Err(e) => auth.report(&e),
                }
                set_busy.set(false);
            });
        }
    };

    let mature = move |_| {
        if !confirm(&format!("Mark FD {} as matured?", fd_no)) {
            return;
        }
        let auth = auth.clone();
        let scope = scope.clone();
        let reload = Rc::clone(&reload);
        let fd_no = Rc::clone(&fd_no);
        set_busy.set(true);
        spawn_local(async move {
            let api = auth.api();
            match scope.run(api.mature_fd(&fd_no)).await {
                Ok(done) => {
                    toasts.show_success(&done.message);
                    reload();
                }
                Err(e) => auth.report(&e),
            }
            set_busy.set(false);
        });
    };

    view! {
        <div class="flex items-center space-x-3">
            <button
                class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg transition-colors disabled:opacity-50"
                disabled=move || busy.get()
                on:click=download
            >
                "Download receipt"
            </button>
            {can_mature.then(|| view! {
                <button
                    class="px-4 py-2 bg-green-700 hover:bg-green-600 rounded-lg transition-colors disabled:opacity-50"
                    disabled=move || busy.get()
                    on:click=mature
                >
                    "Mark as matured"
                </button>
            })}
            {move || busy.get().then(|| view! { <InlineLoading /> })}
        </div>
    }
}

/// Premature closure: pick a date, simulate, then confirm
#[component]
fn ClosurePanel(fd: FdAccount, scope: RequestScope, reload: Rc<dyn Fn()>) -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let toasts = expect_context::<GlobalState>();
    let draft = create_rw_signal(ClosureDraft::new(today()));
    let (busy, set_busy) = create_signal(false);
    let fd = Rc::new(fd);

    let on_date = move |ev: ev::Event| {
        if let Ok(date) = NaiveDate::parse_from_str(&event_target_value(&ev), "%Y-%m-%d") {
            draft.update(|d| d.set_date(date));
        }
    };

    let simulate = {
        let auth = auth.clone();
        let scope = scope.clone();
        let fd = Rc::clone(&fd);
        move |_| {
            let auth = auth.clone();
            let scope = scope.clone();
            let fd = Rc::clone(&fd);
            let date = draft.with_untracked(|d| d.closure_date());
            set_busy.set(true);
            spawn_local(async move {
                let api = auth.api();
                match scope.run(api.simulate_closure(&fd.fd_no, date)).await {
                    // A result for a date the user has since changed is dropped
                    Ok(simulation) => draft.update(|d| {
                        d.record(date, simulation);
                    }),
                    Err(e) => auth.report(&e),
                }
                set_busy.set(false);
            });
        }
    };

    let close = move |_| {
        let current = draft.get_untracked();
        let Some(simulation) = current.simulation() else {
            return;
        };
        let prompt = format!(
            "Close FD {} on {}? Net payout {}.",
            fd.fd_no,
            format_date(current.closure_date()),
            format_inr(simulation.net_payout)
        );
        if !confirm(&prompt) {
            return;
        }

        let auth = auth.clone();
        let scope = scope.clone();
        let reload = Rc::clone(&reload);
        let fd = Rc::clone(&fd);
        set_busy.set(true);
        spawn_local(async move {
            let api = auth.api();
            let outcome = scope
                .run(async { Ok(current.close(api.as_ref(), &fd).await) })
                .await;
            match outcome {
                Ok(Ok(done)) => {
                    toasts.show_success(&done.message);
                    reload();
                }
                Ok(Err(ClosureError::Blocked(reason))) => toasts.show_error(&reason.to_string()),
                Ok(Err(ClosureError::Api(e))) | Err(e) => auth.report(&e),
            }
            set_busy.set(false);
        });
    };

    view! {
        <div class="bg-gray-800 rounded-lg p-6 space-y-4">
            <h2 class="text-lg font-semibold">"Premature closure"</h2>
            <div class="flex items-end space-x-3">
                <label class="block">
                    <span class="text-sm text-gray-400">"Closure date"</span>
                    <input
                        type="date"
                        class="mt-1 bg-gray-700 border border-gray-600 rounded-lg px-3 py-2 text-white"
                        prop:value=move || draft.with(|d| d.closure_date().format("%Y-%m-%d").to_string())
                        on:change=on_date
                    />
                </label>
                <button
                    class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg transition-colors disabled:opacity-50"
                    disabled=move || busy.get()
                    on:click=simulate
                >
                    "Simulate"
                </button>
                <button
                    class="px-4 py-2 bg-red-700 hover:bg-red-600 rounded-lg transition-colors disabled:opacity-50"
                    disabled=move || busy.get() || !draft.with(|d| d.can_close())
                    on:click=close
                >
                    "Close FD"
                </button>
            </div>

            {move || draft.with(|d| d.simulation().cloned()).map(|sim| view! { <Breakdown sim=sim /> })}
        </div>
    }
}

#[component]
fn Breakdown(sim: ClosureSimulation) -> impl IntoView {
    let rows = vec![
        ("Principal", format_inr(sim.principal)),
        ("Days held", sim.days_held.to_string()),
        ("Years held", format!("{:.2}", sim.years_held)),
        ("Accrued interest", format_inr(sim.accrued_interest)),
        (
            "Penalty",
            format!("{} ({})", format_inr(sim.penalty_amount), format_percent(sim.penalty_percent)),
        ),
        ("Net interest", format_inr(sim.net_interest)),
        ("Net payout", format_inr(sim.net_payout)),
    ];

    view! {
        <div class="border-t border-gray-700 pt-4">
            <dl class="grid grid-cols-2 md:grid-cols-4 gap-4">
                {rows
                    .into_iter()
                    .map(|(label, value)| view! {
                        <div>
                            <dt class="text-sm text-gray-400">{label}</dt>
                            <dd class="font-medium">{value}</dd>
                        </div>
                    })
                    .collect_view()}
            </dl>
            {sim.note.map(|note| view! { <p class="text-xs text-gray-500 mt-3">{note}</p> })}
        </div>
    }
}
