//! FD Table Component
//!
//! Register rows; each FD number links to its details page.

use leptos::*;
use leptos_router::*;

use fd_manager::display::{format_date, format_inr, format_percent};
use fd_manager::guard::Route;
use fd_manager::models::FdAccount;

use super::StatusBadge;

#[component]
pub fn FdTable(rows: Vec<FdAccount>) -> impl IntoView {
    view! {
        <div class="overflow-x-auto">
            <table class="w-full text-sm text-left">
                <thead class="text-gray-400 border-b border-gray-700">
                    <tr>
                        <th class="py-2 px-3">"FD No"</th>
                        <th class="py-2 px-3">"Customer"</th>
                        <th class="py-2 px-3 text-right">"Amount"</th>
                        <th class="py-2 px-3 text-right">"Rate"</th>
                        <th class="py-2 px-3">"Tenure"</th>
                        <th class="py-2 px-3">"Start"</th>
                        <th class="py-2 px-3">"Maturity"</th>
                        <th class="py-2 px-3">"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    {rows
                        .into_iter()
                        .map(|fd| {
                            let href = Route::FdDetails(fd.fd_no.clone()).path();
                            view! {
                                <tr class="border-b border-gray-800 hover:bg-gray-800">
                                    <td class="py-2 px-3">
                                        <A href=href class="text-primary-400 hover:underline">
                                            {fd.fd_no.clone()}
                                        </A>
                                    </td>
                                    <td class="py-2 px-3">{fd.customer_name.clone()}</td>
                                    <td class="py-2 px-3 text-right">{format_inr(fd.deposit_amount)}</td>
                                    <td class="py-2 px-3 text-right">{format_percent(fd.interest_rate)}</td>
                                    <td class="py-2 px-3">{fd.tenure_label()}</td>
                                    <td class="py-2 px-3">{format_date(fd.start_date)}</td>
                                    <td class="py-2 px-3">{format_date(fd.maturity_date)}</td>
                                    <td class="py-2 px-3"><StatusBadge status=fd.status /></td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}
