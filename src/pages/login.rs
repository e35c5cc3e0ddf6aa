//! Login page: email + password form backed by [`LoginController`].

use std::rc::Rc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::config::AuthConfig;
use crate::net::cognito::CognitoAuthenticator;
use crate::net::types::Credentials;
use crate::state::login::{FormState, LoginController};
use crate::state::session::SessionStore;
use crate::util::validation::Field;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<SessionStore>();
    let config = expect_context::<AuthConfig>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let form = RwSignal::new(FormState::default());

    let controller = LoginController::new(
        Rc::new(CognitoAuthenticator::new(config)),
        Rc::new(move |path: &str| navigate(path, NavigateOptions::default())),
        session,
    );
    controller.subscribe(move |state| form.set(state.clone()));
    let controller = StoredValue::new_local(controller);

    let draft = move || Credentials::new(email.get_untracked(), password.get_untracked());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let controller = controller.get_value();
        let credentials = draft();
        leptos::task::spawn_local(async move {
            let _ = controller.submit(credentials).await;
        });
    };

    let on_email = move |ev: leptos::ev::Event| {
        email.set(event_target_value(&ev));
        controller.with_value(|c| c.edit(&draft()));
    };
    let on_password = move |ev: leptos::ev::Event| {
        password.set(event_target_value(&ev));
        controller.with_value(|c| c.edit(&draft()));
    };

    let field_error = move |field: Field| form.with(|f| f.field_errors.get(field));
    let submit_error = move || form.with(|f| f.submit_error().map(str::to_owned));

    view! {
        <div class="login-page">
            <div class="login-card">
                <h2>"Sign in to your account"</h2>
                <form class="login-form" on:submit=on_submit novalidate=true>
                    <label for="email" class="sr-only">"Email address"</label>
                    <input
                        id="email"
                        name="email"
                        type="email"
                        class="login-input"
                        placeholder="Email address"
                        prop:value=move || email.get()
                        on:input=on_email
                    />
                    <Show when=move || field_error(Field::Identifier).is_some()>
                        <div class="login-error">{move || field_error(Field::Identifier).unwrap_or_default()}</div>
                    </Show>
                    <label for="password" class="sr-only">"Password"</label>
                    <input
                        id="password"
                        name="password"
                        type="password"
                        class="login-input"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=on_password
                    />
                    <Show when=move || field_error(Field::Secret).is_some()>
                        <div class="login-error">{move || field_error(Field::Secret).unwrap_or_default()}</div>
                    </Show>
                    <Show when=move || submit_error().is_some()>
                        <div class="login-error login-error--submit">{move || submit_error().unwrap_or_default()}</div>
                    </Show>
                    <button
                        class="login-button"
                        type="submit"
                        disabled=move || form.with(FormState::is_submitting)
                    >
                        {move || form.with(FormState::submit_label)}
                    </button>
                </form>
            </div>
        </div>
    }
}
