//! Signed-in landing page: greeting, questionnaire summary, and logout.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::use_api;
use crate::net::types::{Questionnaire, User};
use crate::routes::{CREATE_QUESTIONNAIRE_PATH, LOGIN_PATH, QUESTIONNAIRES_PATH};
use crate::state::auth::AuthState;

fn greeting(user: Option<&User>) -> String {
    match user {
        Some(user) => format!("Welcome, {}", user.label()),
        None => "Welcome".to_owned(),
    }
}

fn summary(questionnaires: &[Questionnaire]) -> String {
    let published = questionnaires.iter().filter(|q| q.is_published).count();
    match questionnaires.len() {
        0 => "You have no questionnaires yet.".to_owned(),
        1 => format!("1 questionnaire, {published} published."),
        n => format!("{n} questionnaires, {published} published."),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = use_api();
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let items = RwSignal::new(Vec::<Questionnaire>::new());
    let info = RwSignal::new(String::new());

    #[cfg(feature = "hydrate")]
    super::questionnaires::load_questionnaires(api, items, info);

    let on_logout = move |_| {
        api.with_value(|a| a.session().logout());
        navigate(LOGIN_PATH, NavigateOptions::default());
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>{move || auth.with(|s| greeting(s.current_user()))}</h1>
                <button class="btn" on:click=on_logout>"Logout"</button>
            </header>
            <Show when=move || auth.with(AuthState::is_loading)>
                <p class="dashboard-page__loading">"Loading..."</p>
            </Show>
            <Show when=move || !info.get().is_empty()>
                <p class="dashboard-page__message">{move || info.get()}</p>
            </Show>
            <p class="dashboard-page__summary">{move || items.with(|list| summary(list))}</p>
            <nav class="dashboard-page__links">
                <a class="btn btn--primary" href=CREATE_QUESTIONNAIRE_PATH>"New questionnaire"</a>
                <a class="btn" href=QUESTIONNAIRES_PATH>"My questionnaires"</a>
            </nav>
        </div>
    }
}
