//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` builds the one `SessionStore` and the one `ApiClient` for the page
//! lifetime and provides them through context, together with an
//! `RwSignal<AuthState>` mirror that views track. A 401 observed by the
//! client bumps `SessionExpired`; `RouteGuard` reacts by navigating to
//! `/login`.
//!
//! The server cannot see `localStorage`, so the first render on both sides
//! is anonymous. The persisted session is read in an effect after hydration,
//! and protected routes stay unmounted until then.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{ProtectedRoute, Redirect, Route, Router, Routes},
    hooks::{use_location, use_navigate},
};

use crate::net::client::ApiClient;
use crate::net::config::ApiConfig;
use crate::net::transport::BrowserTransport;
use crate::pages::{
    create_questionnaire::CreateQuestionnairePage, dashboard::DashboardPage, home::HomePage, login::LoginPage,
    questionnaires::QuestionnairesPage, register::RegisterPage,
};
use crate::routes::{CREATE_QUESTIONNAIRE_PATH, DASHBOARD_PATH, LOGIN_PATH, QUESTIONNAIRES_PATH, resolve};
use crate::state::auth::{AuthState, SessionStore};
use crate::util::auth::{SessionExpired, install_expiry_redirect, install_route_guard, route_access};
use crate::util::location::BrowserLocation;
use crate::util::storage::BrowserStorage;

/// API client type used by the running app.
pub type AppApi = ApiClient<BrowserTransport>;

/// Handle to the app's API client.
///
/// The handle is `Copy` and thread-safe so it can move into view closures;
/// call `get_value()` where the client itself is needed.
pub fn use_api() -> StoredValue<AppApi, LocalStorage> {
    expect_context::<StoredValue<AppApi, LocalStorage>>()
}

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = SessionStore::new(BrowserStorage);
    let auth = RwSignal::new(AuthState::default());
    session.subscribe(move |state| auth.set(state.clone()));

    let expired = RwSignal::new(SessionExpired::default());
    let client = ApiClient::new(ApiConfig::from_env(), BrowserTransport, session, BrowserLocation);
    client.on_unauthorized(move || expired.update(|e| e.0 += 1));
    let api = StoredValue::new_local(client);

    let ready = RwSignal::new(false);
    Effect::new(move || {
        api.with_value(|a| a.session().initialize_auth());
        ready.set(true);
    });

    let access = move |path: &'static str| {
        move || {
            auth.track();
            let authenticated = api.with_value(|a| a.session().has_persisted_token());
            route_access(resolve(path), ready.get(), authenticated)
        }
    };
    let to_login = || LOGIN_PATH;

    provide_context(auth);
    provide_context(expired);
    provide_context(api);

    view! {
        <Stylesheet id="leptos" href="/pkg/questionnaire-web.css"/>
        <Title text="Questionnaires"/>

        <Router>
            <RouteGuard/>
            <Routes fallback=|| view! { <Redirect path="/"/> }>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("register") view=RegisterPage/>
                <ProtectedRoute
                    path=StaticSegment("dashboard")
                    view=DashboardPage
                    condition=access(DASHBOARD_PATH)
                    redirect_path=to_login
                />
                <ProtectedRoute
                    path=(StaticSegment("questionnaire"), StaticSegment("create"))
                    view=CreateQuestionnairePage
                    condition=access(CREATE_QUESTIONNAIRE_PATH)
                    redirect_path=to_login
                />
                <ProtectedRoute
                    path=StaticSegment("questionnaires")
                    view=QuestionnairesPage
                    condition=access(QUESTIONNAIRES_PATH)
                    redirect_path=to_login
                />
            </Routes>
        </Router>
    }
}

/// Applies the navigation guard and the 401 redirect. Renders nothing.
#[component]
fn RouteGuard() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let expired = expect_context::<RwSignal<SessionExpired>>();
    let api = use_api();
    let location = use_location();
    let navigate = use_navigate();

    let pathname = move || location.pathname.get();
    let authenticated = move || api.with_value(|a| a.session().has_persisted_token());
    install_route_guard(pathname, auth, authenticated, navigate.clone());
    install_expiry_redirect(expired, navigate);
}
