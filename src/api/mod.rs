//! Client for the WhenWorks API and the error normalization boundary

mod client;
mod error;

pub use client::*;
pub use error::*;
