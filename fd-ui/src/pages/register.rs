//! FD Register Page
//!
//! The full FD list is fetched once; filters narrow it locally.

use chrono::NaiveDate;
use leptos::*;

use fd_manager::api::FdApi;
use fd_manager::models::{FdAccount, FdStatus};
use fd_manager::register::{FdFilter, RegisterView};

use crate::components::{FdTable, LoadFailed, Loading};
use crate::state::{page_scope, AuthContext, Load};

const INPUT_CLASS: &str =
    "mt-1 w-full bg-gray-700 border border-gray-600 rounded-lg px-3 py-2 text-white";

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[component]
pub fn Register() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let scope = page_scope();
    let accounts = create_rw_signal(Load::<Vec<FdAccount>>::Loading);
    let filter = create_rw_signal(FdFilter::default());

    spawn_local(async move {
        let api = auth.api();
        let result = scope.run(api.list_fds(None)).await;
        auth.settle(accounts, result.map(|list| list.fd_accounts));
    });

    let date_input = move |label: &'static str, set: fn(&mut FdFilter, Option<NaiveDate>)| {
        view! {
            <label class="block">
                <span class="text-sm text-gray-400">{label}</span>
                <input
                    type="date"
                    class=INPUT_CLASS
                    on:change=move |ev| {
                        let date = parse_date(&event_target_value(&ev));
                        filter.update(|f| set(f, date));
                    }
                />
            </label>
        }
    };

    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">"FD Register"</h1>

            <div class="bg-gray-800 rounded-lg p-4 grid grid-cols-2 md:grid-cols-6 gap-4">
                <label class="block">
                    <span class="text-sm text-gray-400">"Status"</span>
                    <select
                        class=INPUT_CLASS
                        on:change=move |ev| {
                            let status = event_target_value(&ev).parse::<FdStatus>().ok();
                            filter.update(|f| f.status = status);
                        }
                    >
                        <option value="">"All"</option>
                        {FdStatus::all()
                            .iter()
                            .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                            .collect_view()}
                    </select>
                </label>
                <label class="block">
                    <span class="text-sm text-gray-400">"Customer"</span>
                    <input
                        type="text"
                        class=INPUT_CLASS
                        placeholder="Search name"
                        on:input=move |ev| {
                            let name = event_target_value(&ev);
                            filter.update(|f| f.customer_name = Some(name).filter(|n| !n.is_empty()));
                        }
                    />
                </label>
                {date_input("Start from", |f, d| f.start_date_from = d)}
                {date_input("Start to", |f, d| f.start_date_to = d)}
                {date_input("Maturity from", |f, d| f.maturity_date_from = d)}
                {date_input("Maturity to", |f, d| f.maturity_date_to = d)}
            </div>

            <div class="bg-gray-800 rounded-lg p-4">
                {move || accounts.with(|accounts| match accounts {
                    Load::Loading => view! { <Loading /> }.into_view(),
                    Load::Failed(message) => view! { <LoadFailed message=message.clone() /> }.into_view(),
                    Load::Ready(accounts) => filter.with(|filter| {
                        let view = RegisterView::build(accounts, filter);
                        match view.message() {
                            Some(message) => view! {
                                <p class="text-center text-gray-400 py-8">{message}</p>
                            }
                            .into_view(),
                            None => {
                                let rows: Vec<FdAccount> =
                                    view.rows().iter().map(|fd| (*fd).clone()).collect();
                                let count = rows.len();
                                view! {
                                    <FdTable rows=rows />
                                    <p class="text-sm text-gray-400 mt-3">{format!("{} FD(s)", count)}</p>
                                }
                                .into_view()
                            }
                        }
                    }),
                })}
            </div>
        </div>
    }
}
