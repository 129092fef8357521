//! gamestringer-server — entry point.
//!
//! Startup order:
//! 1. Parse configuration from environment variables.
//! 2. Initialise structured tracing.
//! 3. Open the database and run pending migrations.
//! 4. Build the Axum router and serve with graceful shutdown.

mod config;
mod error;
mod routes;
mod state;
mod validation;

use migration::{Migrator, MigratorTrait};
use tracing::info;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| config.log_level.parse::<tracing_subscriber::EnvFilter>())
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    std::fs::create_dir_all(&config.data_dir)?;

    let db = gamestringer_db::connect(&config.database_url).await?;
    Migrator::up(&db, None).await?;
    info!(url = %config.database_url, "database ready");

    let bind_address = config.bind_address.clone();
    let app = routes::app(AppState::new(config, db));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(%bind_address, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut signal) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            signal.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received");
}
