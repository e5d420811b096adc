//! Navigation Component
//!
//! Header bar with the links the current role may use and the logout button.

use leptos::*;
use leptos_router::*;

use fd_manager::guard::{Gate, Route};

use crate::state::{AuthContext, GlobalState};

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let state = expect_context::<GlobalState>();
    let navigate = use_navigate();

    move || {
        let profile = auth.state.with(|s| s.profile().cloned())?;

        let links = [
            Route::Dashboard,
            Route::CreateFd,
            Route::Register,
            Route::Config,
            Route::Users,
        ]
        .into_iter()
        .filter(|route| profile.is_supervisor() || route.gate() != Some(Gate::Supervisor))
        .map(|route| view! { <NavLink href=route.path() label=route.title() /> })
        .collect_view();

        let auth = auth.clone();
        let navigate = navigate.clone();
        let on_logout = move |_| {
            let auth = auth.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
                auth.logout().await;
                state.show_success("Logged out");
                navigate(&Route::Login.path(), Default::default());
            });
        };

        Some(view! {
            <nav class="bg-gray-800 border-b border-gray-700">
                <div class="container mx-auto px-4">
                    <div class="flex items-center justify-between h-16">
                        // Logo and brand
                        <A href="/dashboard" class="flex items-center space-x-3">
                            <span class="text-2xl">"🏦"</span>
                            <span class="text-xl font-bold text-white">"FD Manager"</span>
                        </A>

                        <div class="flex items-center space-x-1">{links}</div>

                        <div class="flex items-center space-x-3 text-sm text-gray-300">
                            <span>{format!("{} ({})", profile.username, profile.role.label())}</span>
                            <button
                                class="px-3 py-1 rounded-lg bg-gray-700 hover:bg-gray-600 transition-colors"
                                on:click=on_logout
                            >
                                "Logout"
                            </button>
                        </div>
                    </div>
                </div>
            </nav>
        })
    }
}

/// Individual navigation link
#[component]
fn NavLink(href: String, label: &'static str) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}
