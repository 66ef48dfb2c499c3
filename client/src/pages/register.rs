//! Account registration with a live username availability check.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::use_api;
use crate::net::types::{AvailabilityResponse, RegisterRequest};
use crate::routes::LOGIN_PATH;

#[derive(Clone, Debug, Default)]
struct RegisterForm {
    name: String,
    display_name: String,
    username: String,
    password: String,
}

/// Trim the text fields and require the ones the backend requires. The
/// password is sent as typed.
fn validate_register_input(form: &RegisterForm) -> Result<RegisterRequest, &'static str> {
    let name = form.name.trim();
    let username = form.username.trim();
    if name.is_empty() || username.is_empty() || form.password.is_empty() {
        return Err("Name, username and password are required.");
    }
    Ok(RegisterRequest {
        name: name.to_owned(),
        display_name: form.display_name.trim().to_owned(),
        username: username.to_owned(),
        password: form.password.clone(),
    })
}

fn availability_message(available: bool) -> &'static str {
    if available { "Username is available." } else { "Username is already taken." }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = use_api();
    let navigate = use_navigate();
    let form = RwSignal::new(RegisterForm::default());
    let availability = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_username_blur = move |_| {
        let username = form.with(|f| f.username.trim().to_owned());
        if username.is_empty() {
            availability.set(String::new());
            return;
        }
        let api = api.get_value();
        leptos::task::spawn_local(async move {
            let checked = api.auth().check_username(&username).await;
            let message = match checked.and_then(|r| r.json::<AvailabilityResponse>()) {
                Ok(body) => availability_message(body.available).to_owned(),
                Err(e) => {
                    log::warn!("username availability check failed: {e}");
                    String::new()
                }
            };
            availability.set(message);
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match form.with(validate_register_input) {
            Ok(r) => r,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Creating account...".to_owned());

        let api = api.get_value();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let session = api.session().clone();
            session.set_loading(true);
            let result = api.auth().register(&request).await;
            session.set_loading(false);
            match result {
                Ok(_) => navigate(LOGIN_PATH, NavigateOptions::default()),
                Err(e) => {
                    info.set(format!("Registration failed: {}", e.user_message()));
                    busy.set(false);
                }
            }
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Create account"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="full name"
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="text"
                        placeholder="display name (optional)"
                        prop:value=move || form.with(|f| f.display_name.clone())
                        on:input=move |ev| form.update(|f| f.display_name = event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="text"
                        placeholder="username"
                        autocomplete="username"
                        prop:value=move || form.with(|f| f.username.clone())
                        on:input=move |ev| form.update(|f| f.username = event_target_value(&ev))
                        on:blur=on_username_blur
                    />
                    <Show when=move || !availability.get().is_empty()>
                        <p class="login-message">{move || availability.get()}</p>
                    </Show>
                    <input
                        class="login-input"
                        type="password"
                        placeholder="password"
                        autocomplete="new-password"
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Register"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <p class="login-card__subtitle">
                    "Already registered? " <a href=LOGIN_PATH>"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
