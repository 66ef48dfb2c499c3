//! Login page: username + password against `POST /login`.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::use_api;
use crate::net::types::{Credentials, LoginResponse, User};
use crate::routes::{DASHBOARD_PATH, REGISTER_PATH};

fn validate_login_input(username: &str, password: &str) -> Result<Credentials, &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err("Enter your username and password.");
    }
    Ok(Credentials { username: username.to_owned(), password: password.to_owned() })
}

/// Profile to store for a successful login. Backends that only return a
/// token get a profile built from the submitted username.
fn session_user(response: &LoginResponse, username: &str) -> User {
    response.user.clone().unwrap_or_else(|| User::from_username(username))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = use_api();
    let navigate = use_navigate();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let credentials = match validate_login_input(&username.get(), &password.get()) {
            Ok(c) => c,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        let api = api.get_value();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let session = api.session().clone();
            session.set_loading(true);
            let outcome = match api.auth().login(&credentials).await {
                Ok(resp) => resp.json::<LoginResponse>(),
                Err(e) => Err(e),
            };
            session.set_loading(false);
            match outcome {
                Ok(body) => {
                    session.login(session_user(&body, &credentials.username), body.token);
                    navigate(DASHBOARD_PATH, NavigateOptions::default());
                }
                Err(e) => {
                    info.set(format!("Login failed: {}", e.user_message()));
                    busy.set(false);
                }
            }
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Questionnaires"</h1>
                <p class="login-card__subtitle">"Sign in"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="username"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <p class="login-card__subtitle">
                    "No account? " <a href=REGISTER_PATH>"Register"</a>
                </p>
            </div>
        </div>
    }
}
