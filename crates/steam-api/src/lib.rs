//! Steam Web API and store client.
//!
//! Async client for the three upstream endpoints the library pipeline
//! needs: `GetOwnedGames` (key-authenticated), the storefront `appdetails`
//! lookup (anonymous, per-call timeout), and the family-sharing list
//! (cookie-authenticated fallback). Rate-limited Web API calls are retried
//! with exponential backoff.

pub mod client;
pub mod retry;
pub mod types;

pub use client::Client;
pub use retry::RetryPolicy;
pub use types::{FamilyApp, OwnedGame, StoreDetails};

/// Errors from the Steam client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid API key")]
    InvalidKey,

    #[error("family-sharing cookie not configured")]
    MissingCookie,

    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),
}

impl ApiError {
    /// Returns true for a rate-limit response (HTTP 429).
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ApiError::Api { status: 429, .. })
    }
}
