//! Dashboard Page
//!
//! Totals across the register and the most recent FDs.

use leptos::*;
use leptos_router::*;

use fd_manager::api::FdApi;
use fd_manager::display::format_inr;
use fd_manager::guard::Route;
use fd_manager::register::{DashboardStats, EMPTY_MESSAGE};

use crate::components::{FdTable, LoadFailed, Loading};
use crate::state::{page_scope, AuthContext, Load};

#[component]
pub fn Dashboard() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let scope = page_scope();
    let stats = create_rw_signal(Load::<DashboardStats>::Loading);

    {
        let auth = auth.clone();
        spawn_local(async move {
            let api = auth.api();
            let result = scope.run(api.list_fds(None)).await;
            auth.settle(stats, result.map(|list| DashboardStats::from_accounts(&list.fd_accounts)));
        });
    }

    let greeting = move || {
        auth.state
            .with(|s| s.profile().map(|p| format!("Welcome, {}", p.username)))
            .unwrap_or_default()
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-2xl font-bold">"Dashboard"</h1>
                    <p class="text-gray-400">{greeting}</p>
                </div>
                <A
                    href=Route::CreateFd.path()
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    "New FD"
                </A>
            </div>

            {move || match stats.get() {
                Load::Loading => view! { <Loading /> }.into_view(),
                Load::Failed(message) => view! { <LoadFailed message=message /> }.into_view(),
                Load::Ready(stats) => view! {
                    <div class="grid grid-cols-2 md:grid-cols-5 gap-4">
                        <StatCard label="Total FDs" value=stats.total.to_string() />
                        <StatCard label="Active" value=stats.active.to_string() />
                        <StatCard label="Closed" value=stats.closed.to_string() />
                        <StatCard label="Prematurely Closed" value=stats.prematurely_closed.to_string() />
                        <StatCard label="Total Deposits" value=format_inr(stats.total_deposits) />
                    </div>

                    <div class="bg-gray-800 rounded-lg p-6">
                        <div class="flex items-center justify-between mb-4">
                            <h2 class="text-lg font-semibold">"Recent FDs"</h2>
                            <A href=Route::Register.path() class="text-sm text-primary-400 hover:underline">
                                "View register"
                            </A>
                        </div>
                        {if stats.recent.is_empty() {
                            view! { <p class="text-gray-400">{EMPTY_MESSAGE}</p> }.into_view()
                        } else {
                            view! { <FdTable rows=stats.recent /> }.into_view()
                        }}
                    </div>
                }
                .into_view(),
            }}
        </div>
    }
}

#[component]
fn StatCard(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4">
            <p class="text-sm text-gray-400">{label}</p>
            <p class="text-2xl font-bold mt-1">{value}</p>
        </div>
    }
}
