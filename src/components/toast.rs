//! Fire-and-forget toast notifications
//!
//! The rest of the app only decides the message; presentation lives here.

use dioxus::prelude::*;

/// Visual flavor of a toast
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Handle for firing toasts, provided through context by the root component
#[derive(Clone, Copy)]
pub struct Toasts {
    pub items: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            items: Signal::new(Vec::new()),
            next_id: Signal::new(0),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    pub fn dismiss(&self, id: u64) {
        let mut items = self.items;
        items.write().retain(|toast| toast.id != id);
    }

    fn push(&self, kind: ToastKind, message: String) {
        let id = {
            let mut next_id = self.next_id;
            let mut next_id = next_id.write();
            *next_id += 1;
            *next_id
        };

        let mut items = self.items;
        items.write().push(Toast { id, kind, message });

        // Auto-dismiss in the browser; elsewhere toasts stay until clicked.
        #[cfg(feature = "web")]
        {
            let toasts = *self;
            spawn(async move {
                gloo_timers::future::TimeoutFuture::new(4_000).await;
                toasts.dismiss(id);
            });
        }
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

/// Hook to access the toast handle
pub fn use_toasts() -> Toasts {
    use_context()
}

/// Renders the active toasts in a fixed stack; click one to dismiss it
#[component]
pub fn ToastHost() -> Element {
    let toasts = use_toasts();
    let items = toasts.items.read().clone();

    rsx! {
        div {
            class: "fixed top-4 right-4 z-50 space-y-2",
            for toast in items {
                ToastCard { key: "{toast.id}", toast: toast.clone() }
            }
        }
    }
}

#[component]
fn ToastCard(toast: Toast) -> Element {
    let toasts = use_toasts();
    let id = toast.id;

    let palette = match toast.kind {
        ToastKind::Success => "bg-green-50 border-green-200 text-green-800",
        ToastKind::Error => "bg-red-50 border-red-200 text-red-800",
    };

    rsx! {
        div {
            class: "px-4 py-3 border rounded shadow-md text-sm cursor-pointer {palette}",
            onclick: move |_| toasts.dismiss(id),
            "{toast.message}"
        }
    }
}
