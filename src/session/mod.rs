//! Session state: the shared cache and the route guards built on it

mod cache;
mod guard;

pub use cache::*;
pub use guard::*;
