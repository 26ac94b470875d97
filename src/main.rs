//! WhenWorks web frontend
//!
//! Session-gated Dioxus application for the WhenWorks API. Before any
//! protected view renders, the route guards decide redirect-or-render from
//! a single cached "current user" fact.
//!
//! ## Running
//!
//! Development (with hot reload):
//! ```bash
//! dx serve --features web
//! ```
//!
//! Production build:
//! ```bash
//! dx build --release --features web
//! ```

#![allow(non_snake_case)]

mod api;
mod app;
mod components;
mod pages;
mod routes;
mod session;
mod types;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    api::init_api_base(
        std::env::var("WHENWORKS_API_URL").unwrap_or_else(|_| "/api".to_string()),
    );

    dioxus::launch(app::App);
}
