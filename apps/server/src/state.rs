//! Shared application state injected into every handler.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Config;

/// State shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// SeaORM connection pool.
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(config: Config, db: DatabaseConnection) -> Self {
        Self {
            config: Arc::new(config),
            db,
        }
    }
}
