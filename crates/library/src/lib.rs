//! Library refresh pipeline.
//!
//! Turns the raw upstream sources (owned games, shared-library export,
//! storefront metadata, local install manifests) into enriched
//! [`LibraryGame`](gamestringer_types::LibraryGame) records. The pipeline
//! is plain business logic behind a [`SteamSource`] trait so it can be
//! exercised without the network.

pub mod engine;
pub mod refresh;

pub use engine::{detect_engine, detect_vr};
pub use refresh::{LibraryManager, RefreshInput, SteamSource};

use gamestringer_steam_api::ApiError;

/// Errors from the refresh pipeline.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("steam api error: {0}")]
    Api(#[from] ApiError),
}
