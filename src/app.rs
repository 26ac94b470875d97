//! Root application component

use std::sync::Arc;

use dioxus::prelude::*;

use crate::api;
use crate::components::{ToastHost, Toasts};
use crate::routes::Route;
use crate::session::SessionCache;

/// Root component: builds the shared client and session cache, provides
/// them through context, and mounts the router.
#[component]
pub fn App() -> Element {
    let client = use_context_provider(api::default_client);
    use_context_provider(|| SessionCache::new(Arc::new(client.clone())));
    use_context_provider(Toasts::new);

    rsx! {
        ToastHost {}
        Router::<Route> {}
    }
}
