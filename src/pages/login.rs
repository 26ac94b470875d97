//! Login page
//!
//! Validation runs locally before any network call. A submit event is
//! gated on the pending flag in the handler itself, so rapid repeated
//! submits issue at most one login request.

use dioxus::prelude::*;

use crate::api::{use_api_client, ApiClient, ApiError};
use crate::components::use_toasts;
use crate::routes::Route;
use crate::session::{use_session_cache, SessionCache};
use crate::types::{Credentials, User};

/// Inline validation errors, one per field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    pub username: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

/// Local validation; failures never reach the session client.
pub fn validate_credentials(username: &str, password: &str) -> FieldErrors {
    FieldErrors {
        username: username.is_empty().then_some("Username is required"),
        password: password.is_empty().then_some("Password is required"),
    }
}

/// What a submit event should do
#[derive(Debug, Clone, PartialEq)]
enum SubmitDecision {
    /// Issue the login request.
    Submit(Credentials),
    /// Show inline errors; nothing leaves the page.
    ShowErrors(FieldErrors),
    /// A request is already in flight; do nothing.
    Ignore,
}

/// Gate a submit event: never while a request is in flight, never with
/// locally invalid fields.
fn decide_submit(pending: bool, username: &str, password: &str) -> SubmitDecision {
    if pending {
        return SubmitDecision::Ignore;
    }

    let errors = validate_credentials(username, password);
    if !errors.is_empty() {
        return SubmitDecision::ShowErrors(errors);
    }

    SubmitDecision::Submit(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Submit credentials and store the subject on success.
///
/// A rejected login leaves the cache untouched; the subject from an
/// accepted login is written directly, not refetched.
async fn login_and_store(
    api: &ApiClient,
    cache: &SessionCache,
    credentials: &Credentials,
) -> Result<User, ApiError> {
    let user = api.login(credentials).await?;
    cache.write(user.clone());
    Ok(user)
}

/// Login page
#[component]
pub fn Login() -> Element {
    let api = use_api_client();
    let cache = use_session_cache();
    let toasts = use_toasts();
    let navigator = use_navigator();

    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut field_errors = use_signal(FieldErrors::default);
    let mut is_pending = use_signal(|| false);

    let handle_submit = move |_| {
        match decide_submit(is_pending(), &username(), &password()) {
            SubmitDecision::Ignore => {}
            SubmitDecision::ShowErrors(errors) => field_errors.set(errors),
            SubmitDecision::Submit(credentials) => {
                field_errors.set(FieldErrors::default());
                // Set before spawning: a second submit event delivered
                // ahead of the task's first poll must already see it.
                is_pending.set(true);

                let api = api.clone();
                let cache = cache.clone();
                spawn(async move {
                    match login_and_store(&api, &cache, &credentials).await {
                        Ok(_) => {
                            toasts.success("Logged in successfully");
                            navigator.replace(Route::Home {});
                            // Still pending: the form stays disabled until
                            // navigation unmounts it.
                        }
                        Err(err) => {
                            toasts.error(err.message.clone());
                            is_pending.set(false);
                        }
                    }
                });
            }
        }
    };

    rsx! {
        div {
            class: "min-h-screen bg-gray-100 flex items-center justify-center px-4",

            div {
                class: "bg-white rounded-lg shadow-md p-8 max-w-md w-full",

                div {
                    class: "mb-6 text-center",
                    h1 { class: "text-2xl font-bold text-gray-900 mb-2", "Login to your account" }
                    p { class: "text-gray-600 text-sm", "Enter your username below to login to your account" }
                }

                form {
                    onsubmit: handle_submit,
                    div {
                        class: "mb-4",
                        label {
                            class: "block text-sm font-medium text-gray-700 mb-2",
                            "Username"
                        }
                        input {
                            r#type: "text",
                            value: "{username}",
                            oninput: move |e| username.set(e.value()),
                            placeholder: "Enter your username",
                            class: "w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500",
                            disabled: is_pending()
                        }
                        if let Some(message) = field_errors().username {
                            p { class: "mt-1 text-xs text-red-600", "{message}" }
                        }
                    }
                    div {
                        class: "mb-6",
                        label {
                            class: "block text-sm font-medium text-gray-700 mb-2",
                            "Password"
                        }
                        input {
                            r#type: "password",
                            value: "{password}",
                            oninput: move |e| password.set(e.value()),
                            placeholder: "Enter your password",
                            class: "w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500",
                            disabled: is_pending()
                        }
                        if let Some(message) = field_errors().password {
                            p { class: "mt-1 text-xs text-red-600", "{message}" }
                        }
                    }
                    button {
                        r#type: "submit",
                        class: "w-full bg-blue-600 text-white py-2 px-4 rounded-md hover:bg-blue-700 focus:outline-none focus:ring-2 focus:ring-blue-500 focus:ring-offset-2 disabled:opacity-50 disabled:cursor-not-allowed",
                        disabled: is_pending(),
                        if is_pending() { "Signing in..." } else { "Login" }
                    }
                }
            }
        }
    }
}
