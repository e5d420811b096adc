//! Form inputs bound to a core form's raw state and error map

use leptos::*;

use fd_manager::forms::Form;

const INPUT_CLASS: &str = "mt-1 w-full bg-gray-700 border border-gray-600 rounded-lg px-3 py-2 \
     text-white focus:outline-none focus:border-primary-500";

fn field_error<F: Form + 'static>(form: RwSignal<F>, name: &'static str) -> impl IntoView {
    move || {
        form.with(|f| f.error(name).map(str::to_string))
            .map(|message| view! { <p class="text-xs text-red-400 mt-1">{message}</p> })
    }
}

/// Text-like input; editing clears the field's error
pub fn input_field<F: Form + 'static>(
    form: RwSignal<F>,
    name: &'static str,
    label: &'static str,
    kind: &'static str,
    read: fn(&F) -> String,
) -> impl IntoView {
    view! {
        <label class="block">
            <span class="text-sm text-gray-400">{label}</span>
            <input
                type=kind
                name=name
                class=INPUT_CLASS
                prop:value=move || form.with(read)
                on:input=move |ev| form.update(|f| f.set_field(name, &event_target_value(&ev)))
            />
            {field_error(form, name)}
        </label>
    }
}

/// Drop-down over fixed `(value, label)` options
pub fn select_field<F: Form + 'static>(
    form: RwSignal<F>,
    name: &'static str,
    label: &'static str,
    options: Vec<(&'static str, &'static str)>,
    read: fn(&F) -> &'static str,
) -> impl IntoView {
    view! {
        <label class="block">
            <span class="text-sm text-gray-400">{label}</span>
            <select
                name=name
                class=INPUT_CLASS
                on:change=move |ev| form.update(|f| f.set_field(name, &event_target_value(&ev)))
            >
                {options
                    .into_iter()
                    .map(|(value, text)| {
                        view! {
                            <option value=value selected=move || form.with(read) == value>
                                {text}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
            {field_error(form, name)}
        </label>
    }
}
