//! Application pages

mod home;
mod login;

pub use home::*;
pub use login::*;
