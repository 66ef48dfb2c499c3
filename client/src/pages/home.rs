//! Public landing page.

use leptos::prelude::*;

use crate::routes::{DASHBOARD_PATH, LOGIN_PATH, REGISTER_PATH};
use crate::state::auth::AuthState;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    view! {
        <div class="home-page">
            <h1>"Questionnaires"</h1>
            <p class="home-page__tagline">"Create questionnaires, invite people, collect answers."</p>
            <Show
                when=move || auth.with(AuthState::is_authenticated)
                fallback=|| view! {
                    <nav class="home-page__links">
                        <a class="btn btn--primary" href=LOGIN_PATH>"Sign in"</a>
                        <a class="btn" href=REGISTER_PATH>"Register"</a>
                    </nav>
                }
            >
                <nav class="home-page__links">
                    <a class="btn btn--primary" href=DASHBOARD_PATH>"Go to dashboard"</a>
                </nav>
            </Show>
        </div>
    }
}
