//! Static route table.
//!
//! The table is ordered and immutable; [`resolve`] returns the first exact
//! match and falls through to the catch-all, which redirects to `/`.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteName {
    Home,
    Login,
    Register,
    Dashboard,
    CreateQuestionnaire,
    Questionnaires,
    NotFound,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub name: RouteName,
    pub requires_auth: bool,
    /// Set only on the catch-all.
    pub redirect: Option<&'static str>,
}

impl RouteDescriptor {
    const fn page(path: &'static str, name: RouteName, requires_auth: bool) -> Self {
        Self { path, name, requires_auth, redirect: None }
    }
}

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const CREATE_QUESTIONNAIRE_PATH: &str = "/questionnaire/create";
pub const QUESTIONNAIRES_PATH: &str = "/questionnaires";

pub const NOT_FOUND: RouteDescriptor =
    RouteDescriptor { path: "*", name: RouteName::NotFound, requires_auth: false, redirect: Some(HOME_PATH) };

pub const ROUTES: &[RouteDescriptor] = &[
    RouteDescriptor::page(HOME_PATH, RouteName::Home, false),
    RouteDescriptor::page(LOGIN_PATH, RouteName::Login, false),
    RouteDescriptor::page(REGISTER_PATH, RouteName::Register, false),
    RouteDescriptor::page(DASHBOARD_PATH, RouteName::Dashboard, true),
    RouteDescriptor::page(CREATE_QUESTIONNAIRE_PATH, RouteName::CreateQuestionnaire, true),
    RouteDescriptor::page(QUESTIONNAIRES_PATH, RouteName::Questionnaires, true),
    NOT_FOUND,
];

/// Strip query, fragment, and trailing slashes (except on the root).
fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() { HOME_PATH } else { trimmed }
}

/// Descriptor for `path`, or the catch-all.
pub fn resolve(path: &str) -> &'static RouteDescriptor {
    let path = normalize(path);
    ROUTES
        .iter()
        .find(|route| route.redirect.is_none() && route.path == path)
        .unwrap_or(&NOT_FOUND)
}
