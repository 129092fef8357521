//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors become JSON bodies with an
//! appropriate status code. Internal errors (database, cache) are logged
//! with full detail but clients only see a generic message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use gamestringer_cache::CacheError;
use gamestringer_library::LibraryError;
use gamestringer_steam_api::ApiError;
use sea_orm::DbErr;

/// All errors that can occur in the request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The caller sent an invalid or malformed request.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The operation requires a stored account and none exists.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The caller referenced a resource that does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The upstream Steam API failed after retries.
    #[error("upstream error: {0}")]
    Upstream(#[from] ApiError),

    /// Propagated from the persistence layer.
    #[error("database error: {0}")]
    Database(#[from] DbErr),

    /// Propagated from the library cache.
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),
}

impl From<LibraryError> for ServerError {
    fn from(e: LibraryError) -> Self {
        match e {
            LibraryError::Api(api) => ServerError::Upstream(api),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, client_message) = match &self {
            // Client-facing errors: expose the message directly.
            ServerError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            ServerError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m.clone()),
            ServerError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),

            // Upstream failures: log detail, tell the client which side broke.
            ServerError::Upstream(e) => {
                error!(error = %e, "steam upstream failure");
                (
                    StatusCode::BAD_GATEWAY,
                    "steam api request failed".to_owned(),
                )
            }

            // Internal errors: log detail, return a generic message.
            ServerError::Database(e) => {
                error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
            ServerError::Cache(e) => {
                error!(error = %e, "cache error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };

        (status, Json(json!({ "error": client_message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ServerError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            status_of(ServerError::BadRequest("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ServerError::Unauthorized("x".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(ServerError::NotFound("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ServerError::Upstream(ApiError::Api {
                status: 429,
                body: "rate limited".into()
            })),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(ServerError::Database(DbErr::Custom("x".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_detail_is_redacted() {
        let response =
            ServerError::Database(DbErr::Custom("secret table layout".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // Body is the generic message; the detail only reaches the logs.
    }
}
