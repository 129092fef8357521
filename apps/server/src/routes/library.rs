//! Library refresh endpoint — drives the full enrichment pipeline.

use axum::extract::{Query, State};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use gamestringer_cache as cache;
use gamestringer_db::{AccountsRepository, GamesRepository};
use gamestringer_library::{LibraryManager, RefreshInput};
use gamestringer_steam::{InstalledApp, SteamPaths, scan_installed_in};
use gamestringer_steam_api::Client;
use gamestringer_types::LibraryGame;

use crate::error::ServerError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/library/refresh", post(refresh))
}

#[derive(Deserialize)]
struct RefreshQuery {
    #[serde(default)]
    force: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    total: usize,
    installed: usize,
    persisted: u64,
    from_cache: bool,
}

async fn refresh(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> Result<Json<RefreshResponse>, ServerError> {
    let account = AccountsRepository::get(&state.db)
        .await?
        .ok_or_else(|| ServerError::Unauthorized("no steam account stored".into()))?;

    // Fresh cache short-circuits the upstream fetch entirely.
    if !query.force
        && let Some(cached) = cache::read_cache(&state.config.data_dir, cache::DEFAULT_TTL)?
    {
        info!(count = cached.games.len(), "serving library from cache");
        let persisted = GamesRepository::upsert_all(&state.db, &cached.games).await?;
        return Ok(Json(summarize(&cached.games, persisted, true)));
    }

    let api_key = state.config.steam_api_key.as_deref().ok_or_else(|| {
        ServerError::BadRequest("STEAM_API_KEY is not configured".into())
    })?;

    let mut client = Client::new(api_key)?;
    if let Some(cookie) = &state.config.steam_family_cookie {
        client = client.with_family_cookie(cookie.clone());
    }

    let installed = scan_local_installs();
    let shared_xml = read_shared_xml(&state);

    let manager = LibraryManager::new();
    let games = manager
        .refresh(
            &client,
            RefreshInput {
                steam_id: &account.steam_id,
                shared_xml: shared_xml.as_deref(),
                installed: &installed,
            },
        )
        .await?;

    if let Err(e) = cache::write_cache(&state.config.data_dir, &games) {
        warn!(error = %e, "failed to write library cache");
    }

    let persisted = GamesRepository::upsert_all(&state.db, &games).await?;
    info!(total = games.len(), persisted, "library refresh complete");

    Ok(Json(summarize(&games, persisted, false)))
}

/// Scans Steam manifests; a missing installation just means nothing is
/// locally installed.
fn scan_local_installs() -> Vec<InstalledApp> {
    match SteamPaths::new() {
        Ok(paths) => scan_installed_in(&paths),
        Err(e) => {
            warn!(error = %e, "steam installation not found, skipping install matching");
            Vec::new()
        }
    }
}

fn read_shared_xml(state: &AppState) -> Option<String> {
    std::fs::read_to_string(state.config.shared_xml_path()).ok()
}

fn summarize(games: &[LibraryGame], persisted: u64, from_cache: bool) -> RefreshResponse {
    RefreshResponse {
        total: games.len(),
        installed: games.iter().filter(|g| g.installed).count(),
        persisted,
        from_cache,
    }
}
