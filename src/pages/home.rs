//! Signed-in landing page

use dioxus::prelude::*;

use crate::api::{use_api_client, ApiClient, ApiError};
use crate::components::use_toasts;
use crate::routes::Route;
use crate::session::{use_session_cache, SessionCache};

/// End the session.
///
/// The local cache is invalidated even when the remote call fails; the
/// caller lands back on the login page either way.
async fn perform_logout(api: &ApiClient, cache: &SessionCache) -> Result<(), ApiError> {
    let result = api.logout().await;
    cache.invalidate();
    result
}

/// Home page; only reachable through the protected layout
#[component]
pub fn Home() -> Element {
    let api = use_api_client();
    let cache = use_session_cache();
    let toasts = use_toasts();
    let navigator = use_navigator();
    let mut is_pending = use_signal(|| false);

    // The guard already primed the cache, so this resolves without a
    // network call.
    let subject = {
        let cache = cache.clone();
        use_resource(move || {
            let cache = cache.clone();
            async move { cache.read().await.ok().flatten() }
        })
    };

    let handle_logout = move |_| {
        if is_pending() {
            return;
        }
        is_pending.set(true);

        let api = api.clone();
        let cache = cache.clone();
        spawn(async move {
            if let Err(err) = perform_logout(&api, &cache).await {
                toasts.error(err.message.clone());
            }
            navigator.replace(Route::Login {});
            is_pending.set(false);
        });
    };

    match &*subject.read_unchecked() {
        Some(Some(user)) => rsx! {
            div {
                class: "min-h-screen bg-gray-100",

                header {
                    class: "bg-white shadow",
                    div {
                        class: "max-w-4xl mx-auto px-4 py-4 flex items-center justify-between",
                        h1 { class: "text-xl font-bold text-gray-900", "WhenWorks" }
                        button {
                            class: "text-sm text-gray-600 hover:text-gray-900 disabled:opacity-50",
                            disabled: is_pending(),
                            onclick: handle_logout,
                            if is_pending() { "Signing out..." } else { "Sign out" }
                        }
                    }
                }

                main {
                    class: "max-w-4xl mx-auto px-4 py-8",
                    div {
                        class: "bg-white rounded-lg shadow-md p-6",
                        div {
                            class: "flex items-center gap-3 mb-4",
                            h2 { class: "text-2xl font-bold text-gray-900", "Welcome back, {user.name}" }
                            if user.is_admin {
                                span {
                                    class: "px-2 py-1 text-xs font-medium bg-blue-100 text-blue-800 rounded",
                                    "Admin"
                                }
                            }
                        }
                        p { class: "text-gray-600 text-sm", "Signed in as {user.username} ({user.email})" }
                    }
                }
            }
        },
        // The guard guarantees a subject; nothing to show in the meantime.
        _ => rsx! { div {} },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::api::CurrentUserSource;
    use crate::types::User;

    struct SignedInSource {
        calls: AtomicUsize,
    }

    #[async_trait(?Send)]
    impl CurrentUserSource for SignedInSource {
        async fn fetch_current_user(&self) -> Result<Option<User>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(User {
                id: Uuid::new_v4(),
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                name: "Alice Doe".to_string(),
                is_admin: false,
                created_at: "2024-01-01T00:00:00Z".to_string(),
            }))
        }
    }

    fn primed_cache() -> (SessionCache, Arc<SignedInSource>) {
        let source = Arc::new(SignedInSource {
            calls: AtomicUsize::new(0),
        });
        (SessionCache::new(source.clone()), source)
    }

    #[tokio::test]
    async fn test_logout_invalidates_cache() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/auth/logout")
            .with_status(204)
            .create_async()
            .await;

        let api = ApiClient::new(server.url());
        let (cache, source) = primed_cache();

        cache.read().await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        assert_eq!(perform_logout(&api, &cache).await, Ok(()));

        // The slot is cold again: the next read has to ask the source.
        cache.read().await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_logout_still_invalidates_cache() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/auth/logout")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "code": "INTERNAL_SERVER_ERROR",
                    "message": "the server encountered a problem",
                    "details": null
                })
                .to_string(),
            )
            .create_async()
            .await;

        let api = ApiClient::new(server.url());
        let (cache, source) = primed_cache();

        cache.read().await.unwrap();

        let err = perform_logout(&api, &cache).await.unwrap_err();
        assert_eq!(err.code, "INTERNAL_SERVER_ERROR");

        // The local session is discarded despite the remote failure.
        cache.read().await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }
}
