//! FD status pill

use leptos::*;

use fd_manager::models::FdStatus;

#[component]
pub fn StatusBadge(status: FdStatus) -> impl IntoView {
    let color = match status {
        FdStatus::Active => "bg-green-700 text-green-100",
        FdStatus::Closed => "bg-gray-600 text-gray-100",
        FdStatus::PrematurelyClosed => "bg-yellow-700 text-yellow-100",
    };

    view! {
        <span class=format!("px-2 py-1 rounded-full text-xs font-medium {}", color)>
            {status.label()}
        </span>
    }
}
