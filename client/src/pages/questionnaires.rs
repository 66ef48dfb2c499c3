//! Owner's questionnaire list with publish, delete, and invite actions.

#[cfg(test)]
#[path = "questionnaires_test.rs"]
mod questionnaires_test;

use leptos::prelude::*;
use serde::Deserialize;

use crate::app::{AppApi, use_api};
use crate::net::client::{ApiClient, ApiError, ApiResponse};
use crate::net::types::{InviteResponse, Questionnaire};
use crate::routes::CREATE_QUESTIONNAIRE_PATH;

/// The list endpoint has answered both with a bare array and with an
/// envelope; accept either.
#[derive(Deserialize)]
#[serde(untagged)]
enum QuestionnaireList {
    Bare(Vec<Questionnaire>),
    Wrapped { questionnaires: Vec<Questionnaire> },
}

fn decode_questionnaires(response: &ApiResponse) -> Result<Vec<Questionnaire>, ApiError> {
    if response.body.trim().is_empty() || response.body.trim() == "null" {
        return Ok(Vec::new());
    }
    Ok(match response.json::<QuestionnaireList>()? {
        QuestionnaireList::Bare(items) | QuestionnaireList::Wrapped { questionnaires: items } => items,
    })
}

fn status_label(questionnaire: &Questionnaire) -> &'static str {
    if questionnaire.is_published { "Published" } else { "Draft" }
}

/// Absolute link for an invitation. The backend returns a path relative to
/// its own base URL.
fn invite_link(base_url: &str, invite: &InviteResponse) -> String {
    if invite.join_url.starts_with("http://") || invite.join_url.starts_with("https://") {
        return invite.join_url.clone();
    }
    format!("{}/{}", base_url.trim_end_matches('/'), invite.join_url.trim_start_matches('/'))
}

/// Run `call` with the session's loading flag raised.
async fn with_loading<T: crate::net::client::Transport, F: Future>(api: &ApiClient<T>, call: F) -> F::Output {
    let session = api.session();
    session.set_loading(true);
    let output = call.await;
    session.set_loading(false);
    output
}

/// Fetch the signed-in user's questionnaires into `items`.
pub(crate) fn load_questionnaires(
    api: StoredValue<AppApi, LocalStorage>,
    items: RwSignal<Vec<Questionnaire>>,
    info: RwSignal<String>,
) {
    let api = api.get_value();
    leptos::task::spawn_local(async move {
        let fetched = with_loading(&api, api.questionnaires().get_my_questionnaires()).await;
        match fetched.and_then(|resp| decode_questionnaires(&resp)) {
            Ok(list) => items.set(list),
            Err(e) => info.set(format!("Could not load questionnaires: {}", e.user_message())),
        }
    });
}

#[component]
pub fn QuestionnairesPage() -> impl IntoView {
    let api = use_api();
    let items = RwSignal::new(Vec::<Questionnaire>::new());
    let info = RwSignal::new(String::new());
    let invite = RwSignal::new(None::<String>);

    #[cfg(feature = "hydrate")]
    load_questionnaires(api, items, info);

    let on_publish = Callback::new(move |id: String| {
        let client = api.get_value();
        leptos::task::spawn_local(async move {
            let result = with_loading(&client, client.questionnaires().publish(&id)).await;
            match result {
                Ok(_) => load_questionnaires(api, items, info),
                Err(e) => info.set(format!("Publish failed: {}", e.user_message())),
            }
        });
    });

    let on_delete = Callback::new(move |id: String| {
        let client = api.get_value();
        leptos::task::spawn_local(async move {
            let result = with_loading(&client, client.questionnaires().delete(&id)).await;
            match result {
                Ok(_) => items.update(|list| list.retain(|q| q.id != id)),
                Err(e) => info.set(format!("Delete failed: {}", e.user_message())),
            }
        });
    });

    let on_invite = Callback::new(move |id: String| {
        let client = api.get_value();
        leptos::task::spawn_local(async move {
            let generated = with_loading(&client, client.questionnaires().generate_invite(&id)).await;
            match generated.and_then(|resp| resp.json::<InviteResponse>()) {
                Ok(body) => invite.set(Some(invite_link(&client.config().base_url, &body))),
                Err(e) => info.set(format!("Invite failed: {}", e.user_message())),
            }
        });
    });

    view! {
        <div class="questionnaires-page">
            <header class="questionnaires-page__header">
                <h1>"My questionnaires"</h1>
                <a class="btn btn--primary" href=CREATE_QUESTIONNAIRE_PATH>"New questionnaire"</a>
            </header>
            <Show when=move || !info.get().is_empty()>
                <p class="questionnaires-page__message">{move || info.get()}</p>
            </Show>
            <Show when=move || invite.get().is_some()>
                <p class="questionnaires-page__invite">
                    "Invite link: " <code>{move || invite.get().unwrap_or_default()}</code>
                </p>
            </Show>
            <ul class="questionnaires-page__list">
                <For each=move || items.get() key=|q| q.id.clone() let:q>
                    <QuestionnaireRow questionnaire=q on_publish on_delete on_invite/>
                </For>
            </ul>
        </div>
    }
}

#[component]
fn QuestionnaireRow(
    questionnaire: Questionnaire,
    on_publish: Callback<String>,
    on_delete: Callback<String>,
    on_invite: Callback<String>,
) -> impl IntoView {
    let status = status_label(&questionnaire);
    let published = questionnaire.is_published;
    let id_publish = questionnaire.id.clone();
    let id_delete = questionnaire.id.clone();
    let id_invite = questionnaire.id.clone();

    view! {
        <li class="questionnaire-row">
            <div class="questionnaire-row__title">{questionnaire.title}</div>
            <div class="questionnaire-row__description">{questionnaire.description.unwrap_or_default()}</div>
            <span class="questionnaire-row__status">{status}</span>
            <button disabled=published on:click=move |_| on_publish.run(id_publish.clone())>"Publish"</button>
            <button on:click=move |_| on_invite.run(id_invite.clone())>"Invite"</button>
            <button on:click=move |_| on_delete.run(id_delete.clone())>"Delete"</button>
        </li>
    }
}
