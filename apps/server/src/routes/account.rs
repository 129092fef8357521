//! Stored Steam account endpoints.

use axum::extract::State;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use gamestringer_db::AccountsRepository;

use crate::error::ServerError;
use crate::state::AppState;
use crate::validation::validate_steam_id;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/account", get(get_account))
        .route("/api/account", put(put_account))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    steam_id: String,
}

async fn get_account(State(state): State<AppState>) -> Result<Json<AccountResponse>, ServerError> {
    let account = AccountsRepository::get(&state.db)
        .await?
        .ok_or_else(|| ServerError::NotFound("no account stored".into()))?;

    Ok(Json(AccountResponse {
        steam_id: account.steam_id,
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PutAccountBody {
    steam_id: String,
}

async fn put_account(
    State(state): State<AppState>,
    Json(body): Json<PutAccountBody>,
) -> Result<Json<AccountResponse>, ServerError> {
    validate_steam_id(&body.steam_id)?;

    let stored = AccountsRepository::set(&state.db, &body.steam_id).await?;
    info!(steam_id = %stored.steam_id, "stored steam account");

    Ok(Json(AccountResponse {
        steam_id: stored.steam_id,
    }))
}
