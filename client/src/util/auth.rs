//! Navigation guard shared by every route.
//!
//! SYSTEM CONTEXT
//! ==============
//! `guard` is the pure decision; `install_route_guard` re-runs it whenever the
//! router's pathname or the session changes and applies the redirect.
//! Protected routes additionally hold their view back through
//! `route_access`, so the redirect happens before any page work starts.
//!
//! Effects only run in the browser. `apply_guard` and `apply_expiry` are the
//! effect bodies, callable directly.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::routes::{DASHBOARD_PATH, LOGIN_PATH, RouteDescriptor, RouteName, resolve};
use crate::state::auth::AuthState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Redirect(&'static str),
}

/// Decide what happens when navigating to `to`.
///
/// `authenticated` is the presence of a persisted token.
pub fn guard(to: &RouteDescriptor, authenticated: bool) -> NavigationDecision {
    if to.requires_auth && !authenticated {
        return NavigationDecision::Redirect(LOGIN_PATH);
    }
    if authenticated && matches!(to.name, RouteName::Login | RouteName::Register) {
        return NavigationDecision::Redirect(DASHBOARD_PATH);
    }
    if let Some(target) = to.redirect {
        return NavigationDecision::Redirect(target);
    }
    NavigationDecision::Allow
}

/// [`guard`] for a raw pathname.
pub fn guard_path(path: &str, authenticated: bool) -> NavigationDecision {
    guard(resolve(path), authenticated)
}

/// Whether a protected route may mount its view.
///
/// `None` keeps the view unmounted: before the session has been read in the
/// browser, and whenever the guard would redirect. The redirect itself is
/// left to [`install_route_guard`], so a page never mounts, and never issues
/// requests, for a visitor the guard turns away.
pub fn route_access(to: &RouteDescriptor, ready: bool, authenticated: bool) -> Option<bool> {
    (ready && guard(to, authenticated) == NavigationDecision::Allow).then_some(true)
}

/// One guard pass for `path`: navigate with `replace` when the guard
/// redirects.
pub fn apply_guard<F>(path: &str, authenticated: bool, navigate: &F) -> NavigationDecision
where
    F: Fn(&str, NavigateOptions),
{
    let decision = guard_path(path, authenticated);
    if let NavigationDecision::Redirect(target) = decision {
        log::debug!("route guard: {path} -> {target}");
        navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
    }
    decision
}

/// Re-evaluate the guard on every pathname or session change.
///
/// `authenticated` should read persisted storage; `session` is only tracked
/// so a logout re-runs the check on the current page.
pub fn install_route_guard<P, A, F>(pathname: P, session: RwSignal<AuthState>, authenticated: A, navigate: F)
where
    P: Fn() -> String + 'static,
    A: Fn() -> bool + 'static,
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let path = pathname();
        session.track();
        apply_guard(&path, authenticated(), &navigate);
    });
}

/// Incremented each time the API client tears the session down after a 401.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionExpired(pub u64);

/// Navigate to `/login` when the expiry counter moved since `prev`. The first
/// observation (`prev` is `None`) never navigates.
pub fn apply_expiry<F>(prev: Option<SessionExpired>, current: SessionExpired, navigate: &F) -> bool
where
    F: Fn(&str, NavigateOptions),
{
    let moved = prev.is_some_and(|p| p != current);
    if moved {
        navigate(LOGIN_PATH, NavigateOptions::default());
    }
    moved
}

/// Send the user to `/login` after every 401 teardown.
pub fn install_expiry_redirect<F>(expired: RwSignal<SessionExpired>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + 'static,
{
    Effect::new(move |prev: Option<SessionExpired>| {
        let current = expired.get();
        apply_expiry(prev, current, &navigate);
        current
    });
}
