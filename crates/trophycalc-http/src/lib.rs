//! trophycalc-http - HTTP client for the TrophyCalc API.

mod client;
mod error;

pub use client::ApiClient;

/// Path of the current-user endpoint, relative to the API base.
pub const USER_ENDPOINT: &str = "user";
