//! Reusable UI components

mod loading;
mod toast;

pub use loading::*;
pub use toast::*;
