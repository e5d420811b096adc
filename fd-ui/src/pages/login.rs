//! Login Page

use leptos::*;
use leptos_router::*;

use fd_manager::forms::login::{PASSWORD, USERNAME};
use fd_manager::forms::{Form, LoginForm};
use fd_manager::guard::Route;

use crate::api::{get_api_base, set_api_base};
use crate::components::{input_field, InlineLoading};
use crate::state::AuthContext;

#[component]
pub fn Login() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let form = create_rw_signal(LoginForm::default());
    let (submitting, set_submitting) = create_signal(false);
    let (rejection, set_rejection) = create_signal(None::<String>);

    let on_submit = {
        let auth = auth.clone();
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            if submitting.get_untracked() {
                return;
            }
            let Some(Ok((username, password))) = form.try_update(|f| f.validate()) else {
                return;
            };

            set_submitting.set(true);
            set_rejection.set(None);
            let auth = auth.clone();
            spawn_local(async move {
                // Success flips the session; the redirect below takes over
                if let Err(e) = auth.login(&username, &password).await {
                    web_sys::console::warn_1(&format!("Login failed: {}", e).into());
                    set_rejection.set(Some(e.to_string()));
                    set_submitting.set(false);
                }
            });
        }
    };

    view! {
        <Show when=move || auth.state.with(|s| s.is_authenticated())>
            <Redirect path=Route::Dashboard.path() />
        </Show>

        <div class="max-w-md mx-auto mt-16 bg-gray-800 rounded-lg p-8">
            <h1 class="text-2xl font-bold mb-1">"FD Manager"</h1>
            <p class="text-gray-400 mb-6">"Sign in to manage fixed deposits"</p>

            <form class="space-y-4" on:submit=on_submit>
                {input_field(form, USERNAME, "Username", "text", |f: &LoginForm| f.username.clone())}
                {input_field(form, PASSWORD, "Password", "password", |f: &LoginForm| f.password.clone())}

                {move || rejection.get().map(|message| view! {
                    <p class="text-sm text-red-400">{message}</p>
                })}

                <button
                    type="submit"
                    class="w-full py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors disabled:opacity-50"
                    disabled=move || submitting.get()
                >
                    {move || if submitting.get() {
                        view! { <InlineLoading /> }.into_view()
                    } else {
                        "Login".into_view()
                    }}
                </button>
            </form>

            <BackendSetting />
        </div>
    }
}

/// Backend URL override, kept in `localStorage`. The gateway is built once
/// at startup, so a change reloads the page.
#[component]
fn BackendSetting() -> impl IntoView {
    let on_change = move |ev: ev::Event| {
        let url = event_target_value(&ev);
        set_api_base(url.trim());
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    };

    view! {
        <details class="mt-6 text-sm text-gray-400">
            <summary class="cursor-pointer">"Backend"</summary>
            <input
                type="url"
                class="mt-2 w-full bg-gray-700 border border-gray-600 rounded-lg px-3 py-2 text-white"
                value=get_api_base()
                on:change=on_change
            />
        </details>
    }
}
