use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod account;
mod games;
mod health;
mod library;
mod suggestions;
mod translations;

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(account::router())
        .merge(games::router())
        .merge(library::router())
        .merge(translations::router())
        .merge(suggestions::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
