//! Route definitions for the application
//!
//! The guarded layouts run before their subtrees mount, so every route is
//! either behind the protected gate or the guest-only gate.

use dioxus::prelude::*;

use crate::pages::{Home, Login};
use crate::session::{GuestLayout, ProtectedLayout};

/// All application routes
#[derive(Clone, Debug, PartialEq, Routable)]
#[rustfmt::skip]
pub enum Route {
    // Guest-only routes: a signed-in user is sent home
    #[layout(GuestLayout)]
        #[route("/login")]
        Login {},
    #[end_layout]

    // Protected routes: a signed-out visitor is sent to the login page
    #[layout(ProtectedLayout)]
        #[route("/")]
        Home {},
}
