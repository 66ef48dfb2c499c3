//! Form for a new questionnaire.

#[cfg(test)]
#[path = "create_questionnaire_test.rs"]
mod create_questionnaire_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::use_api;
use crate::net::types::NewQuestionnaire;
use crate::routes::QUESTIONNAIRES_PATH;

fn validate_questionnaire_input(title: &str, description: &str) -> Result<NewQuestionnaire, &'static str> {
    let title = title.trim();
    if title.is_empty() {
        return Err("A title is required.");
    }
    Ok(NewQuestionnaire { title: title.to_owned(), description: description.trim().to_owned() })
}

#[component]
pub fn CreateQuestionnairePage() -> impl IntoView {
    let api = use_api();
    let navigate = use_navigate();
    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let data = match validate_questionnaire_input(&title.get(), &description.get()) {
            Ok(d) => d,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Saving...".to_owned());

        let api = api.get_value();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let session = api.session().clone();
            session.set_loading(true);
            let result = api.questionnaires().create(&data).await;
            session.set_loading(false);
            match result {
                Ok(_) => navigate(QUESTIONNAIRES_PATH, NavigateOptions::default()),
                Err(e) => {
                    info.set(format!("Could not create questionnaire: {}", e.user_message()));
                    busy.set(false);
                }
            }
        });
    };

    view! {
        <div class="create-questionnaire-page">
            <h1>"New questionnaire"</h1>
            <form class="questionnaire-form" on:submit=on_submit>
                <input
                    class="questionnaire-form__input"
                    type="text"
                    placeholder="title"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
                <textarea
                    class="questionnaire-form__input"
                    placeholder="description (optional)"
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))
                ></textarea>
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    "Create"
                </button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="questionnaire-form__message">{move || info.get()}</p>
            </Show>
            <a href=QUESTIONNAIRES_PATH>"Back to my questionnaires"</a>
        </div>
    }
}
