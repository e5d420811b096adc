//! User Management Page (supervisors)

use leptos::*;

use fd_manager::api::FdApi;
use fd_manager::forms::user::{PASSWORD, ROLE, USERNAME};
use fd_manager::forms::{CreateUserForm, Form};
use fd_manager::models::{Role, User};

use crate::components::{input_field, select_field, InlineLoading, LoadFailed, Loading};
use crate::state::{page_scope, AuthContext, GlobalState, Load};

#[component]
pub fn Users() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let toasts = expect_context::<GlobalState>();
    let scope = page_scope();
    let users = create_rw_signal(Load::<Vec<User>>::Loading);
    let form = create_rw_signal(CreateUserForm::default());
    let (submitting, set_submitting) = create_signal(false);

    let load = {
        let auth = auth.clone();
        let scope = scope.clone();
        move || {
            let auth = auth.clone();
            let scope = scope.clone();
            spawn_local(async move {
                let api = auth.api();
                let result = scope.run(api.list_users()).await;
                auth.settle(users, result);
            });
        }
    };
    load();

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
        let load = load.clone();
        spawn_local(async move {
            let api = auth.api();
            match scope.run(api.create_user(&request)).await {
                Ok(done) => {
                    toasts.show_success(&done.message);
                    form.set(CreateUserForm::default());
                    load();
                }
                Err(e) => auth.report(&e),
            }
            set_submitting.set(false);
        });
    };

    let roles = vec![
        (Role::Officer.as_str(), Role::Officer.label()),
        (Role::Supervisor.as_str(), Role::Supervisor.label()),
    ];

    view! {
        <div class="grid md:grid-cols-3 gap-6">
            <div class="md:col-span-2 bg-gray-800 rounded-lg p-6">
                <h1 class="text-2xl font-bold mb-4">"Users"</h1>
                {move || match users.get() {
                    Load::Loading => view! { <Loading /> }.into_view(),
                    Load::Failed(message) => view! { <LoadFailed message=message /> }.into_view(),
                    Load::Ready(list) => view! {
                        <table class="w-full text-sm text-left">
                            <thead class="text-gray-400 border-b border-gray-700">
                                <tr>
                                    <th class="py-2 px-3">"ID"</th>
                                    <th class="py-2 px-3">"Username"</th>
                                    <th class="py-2 px-3">"Role"</th>
                                    <th class="py-2 px-3">"Created"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {list
                                    .into_iter()
                                    .map(|user| view! {
                                        <tr class="border-b border-gray-800">
                                            <td class="py-2 px-3">{user.id}</td>
                                            <td class="py-2 px-3">{user.username}</td>
                                            <td class="py-2 px-3">{user.role.label()}</td>
                                            <td class="py-2 px-3">{user.created_at.unwrap_or_default()}</td>
                                        </tr>
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                    }
                    .into_view(),
                }}
            </div>

            <form class="bg-gray-800 rounded-lg p-6 space-y-4 h-fit" on:submit=on_submit>
                <h2 class="text-lg font-semibold">"New user"</h2>
                {input_field(form, USERNAME, "Username", "text", |f: &CreateUserForm| f.username.clone())}
                {input_field(form, PASSWORD, "Password", "password", |f: &CreateUserForm| f.password.clone())}
                {select_field(form, ROLE, "Role", roles, |f: &CreateUserForm| f.role.as_str())}
                <button
                    type="submit"
                    class="w-full py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors disabled:opacity-50"
                    disabled=move || submitting.get()
                >
                    {move || if submitting.get() {
                        view! { <InlineLoading /> }.into_view()
                    } else {
                        "Create user".into_view()
                    }}
                </button>
            </form>
        </div>
    }
}
