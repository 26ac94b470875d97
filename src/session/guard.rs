//! Route guards: redirect-or-render decided before any gated content mounts
//!
//! A guard returns an explicit [`GuardOutcome`] and the layout components
//! interpret it; navigation is never driven by unwinding. While the cache
//! read is in flight only a spinner renders, so protected content is never
//! mounted for a signed-out visitor, not even transiently.

use dioxus::prelude::*;

use super::cache::{use_session_cache, SessionCache};
use crate::components::LoadingSpinner;
use crate::routes::Route;

/// Result of evaluating a guard
#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome {
    Allow,
    RedirectTo(Route),
}

/// Gate for the authenticated subtree: no subject, no content.
///
/// A fetch failure is treated as "signed out": the visitor lands on the
/// login page and the cache slot stays cold, so the next navigation
/// retries the lookup.
pub async fn check_protected(cache: &SessionCache) -> GuardOutcome {
    match cache.read().await {
        Ok(Some(_)) => GuardOutcome::Allow,
        Ok(None) => GuardOutcome::RedirectTo(Route::Login {}),
        Err(err) => {
            tracing::warn!(code = %err.code, "session lookup failed, treating as signed out");
            GuardOutcome::RedirectTo(Route::Login {})
        }
    }
}

/// Gate for the guest-only subtree: a signed-in user never sees the login
/// form.
pub async fn check_guest_only(cache: &SessionCache) -> GuardOutcome {
    match cache.read().await {
        Ok(Some(_)) => GuardOutcome::RedirectTo(Route::Home {}),
        Ok(None) => GuardOutcome::Allow,
        Err(err) => {
            tracing::warn!(code = %err.code, "session lookup failed, leaving guest page reachable");
            GuardOutcome::Allow
        }
    }
}

/// Layout for routes that require a session
#[component]
pub fn ProtectedLayout() -> Element {
    let cache = use_session_cache();
    let decision = use_resource(move || {
        let cache = cache.clone();
        async move { check_protected(&cache).await }
    });

    match &*decision.read_unchecked() {
        None => rsx! { GuardPending {} },
        Some(GuardOutcome::Allow) => rsx! { Outlet::<Route> {} },
        Some(GuardOutcome::RedirectTo(target)) => rsx! {
            Redirect { to: target.clone() }
        },
    }
}

/// Layout for routes that only make sense signed out
#[component]
pub fn GuestLayout() -> Element {
    let cache = use_session_cache();
    let decision = use_resource(move || {
        let cache = cache.clone();
        async move { check_guest_only(&cache).await }
    });

    match &*decision.read_unchecked() {
        None => rsx! { GuardPending {} },
        Some(GuardOutcome::Allow) => rsx! { Outlet::<Route> {} },
        Some(GuardOutcome::RedirectTo(target)) => rsx! {
            Redirect { to: target.clone() }
        },
    }
}

/// Declarative redirect: dioxus-router 0.6 has no `Redirect` component, so
/// this shim replaces the current history entry via the navigator and
/// renders nothing.
#[component]
fn Redirect(to: Route) -> Element {
    let navigator = use_navigator();
    use_effect(move || {
        navigator.replace(to.clone());
    });
    rsx! {}
}

#[component]
fn GuardPending() -> Element {
    rsx! {
        div {
            class: "min-h-screen flex items-center justify-center bg-gray-100",
            LoadingSpinner {}
        }
    }
}
