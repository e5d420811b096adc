//! App Root Component
//!
//! Main application component with routing, route guards and global
//! providers.

use leptos::*;
use leptos_router::*;

use fd_manager::guard::{GuardDecision, Route as Screen, ACCESS_DENIED_MESSAGE};
use fd_manager::session::SessionState;

use crate::api;
use crate::components::{Loading, Nav, Toast};
use crate::pages::{
    CreateFd, Dashboard, FdDetails, Login, NotFound, Register, SystemConfigPage, Users,
};
use crate::state::{provide_auth, provide_global_state, AuthContext, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();
    provide_auth(expect_context::<GlobalState>());

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                <Nav />

                <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                    <Routes>
                        <Route path="/login" view=Login />
                        <Route path="/" view=|| view! { <Redirect path="/dashboard" /> } />
                        <Route
                            path="/dashboard"
                            view=|| view! { <Protected screen=Screen::Dashboard><Dashboard /></Protected> }
                        />
                        <Route
                            path="/fd/create"
                            view=|| view! { <Protected screen=Screen::CreateFd><CreateFd /></Protected> }
                        />
                        <Route
                            path="/fd/register"
                            view=|| view! { <Protected screen=Screen::Register><Register /></Protected> }
                        />
                        <Route path="/fd/:fd_no" view=FdDetailsRoute />
                        <Route
                            path="/config"
                            view=|| view! { <Protected screen=Screen::Config><SystemConfigPage /></Protected> }
                        />
                        <Route
                            path="/users"
                            view=|| view! { <Protected screen=Screen::Users><Users /></Protected> }
                        />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Footer />

                <Toast />
            </div>
        </Router>
    }
}

/// Renders `children` only once the session passes the screen's gate
#[component]
fn Protected(screen: Screen, children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<AuthContext>();

    move || match auth.state.with(|state| screen.check(state)) {
        GuardDecision::Loading => view! { <Loading /> }.into_view(),
        GuardDecision::RedirectToLogin => view! { <Redirect path=Screen::Login.path() /> }.into_view(),
        GuardDecision::AccessDenied => view! {
            <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
                <div class="text-6xl mb-4">"🔒"</div>
                <h1 class="text-2xl font-bold mb-2">{screen.title()}</h1>
                <p class="text-gray-400">{ACCESS_DENIED_MESSAGE}</p>
            </div>
        }
        .into_view(),
        GuardDecision::Allow => children().into_view(),
    }
}

#[component]
fn FdDetailsRoute() -> impl IntoView {
    let fd_no = fd_no_param(use_params_map());

    // Rebuilt per FD number so moving between FDs reloads the page
    move || {
        let fd_no = fd_no.get();
        view! {
            <Protected screen=Screen::FdDetails(fd_no.clone())>
                <FdDetails fd_no=fd_no.clone() />
            </Protected>
        }
    }
}

/// FD number in the current route, following in-place navigation
fn fd_no_param(params: Memo<ParamsMap>) -> Memo<String> {
    create_memo(move |_| params.with(|p| p.get("fd_no").cloned().unwrap_or_default()))
}

/// Footer component showing the backend and session status
#[component]
fn Footer() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let backend = api::get_api_base();

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                <div class="flex items-center space-x-2">
                    {move || match auth.state.get() {
                        SessionState::Restoring => view! {
                            <span class="flex items-center space-x-2 text-primary-400">
                                <span class="loading-spinner w-4 h-4" />
                                <span>"Restoring session..."</span>
                            </span>
                        }
                        .into_view(),
                        SessionState::Anonymous => view! {
                            <span class="flex items-center space-x-1 text-red-400">
                                <span class="w-2 h-2 bg-red-400 rounded-full" />
                                <span>"Not logged in"</span>
                            </span>
                        }
                        .into_view(),
                        SessionState::Authenticated(session) => view! {
                            <span class="flex items-center space-x-1 text-green-400">
                                <span class="w-2 h-2 bg-green-400 rounded-full pulse" />
                                <span>{format!("Signed in as {}", session.username())}</span>
                            </span>
                        }
                        .into_view(),
                    }}
                </div>

                <div class="text-gray-400">{format!("Backend: {}", backend)}</div>
            </div>
        </footer>
    }
}
