//! Game CRUD endpoints.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use gamestringer_db::entity::games;
use gamestringer_db::{GameFilter, GamesRepository, SortOption, SortOrder, UpdateGame};
use gamestringer_types::Platform;

use crate::error::ServerError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/games", get(list_games))
        .route(
            "/api/games/{id}",
            get(get_game).put(update_game).delete(delete_game),
        )
}

#[derive(Deserialize)]
struct GamesQuery {
    platform: Option<String>,
    installed: Option<bool>,
    engine: Option<String>,
    skip: Option<u64>,
    take: Option<u64>,
    sort: Option<String>,
    order: Option<String>,
}

async fn list_games(
    State(state): State<AppState>,
    Query(query): Query<GamesQuery>,
) -> Result<Json<Vec<games::Model>>, ServerError> {
    let platform = query
        .platform
        .map(|p| {
            p.parse::<Platform>()
                .map_err(ServerError::BadRequest)
                .map(|p| p.as_str().to_string())
        })
        .transpose()?;

    let sort = match query.sort.as_deref() {
        None => SortOption::default(),
        Some("title") => SortOption::Title,
        Some("last_played") => SortOption::LastPlayed,
        Some("added") => SortOption::Added,
        Some(other) => {
            return Err(ServerError::BadRequest(format!("unknown sort key: {other}")));
        }
    };
    let order = match query.order.as_deref() {
        None => SortOrder::default(),
        Some("asc") => SortOrder::Asc,
        Some("desc") => SortOrder::Desc,
        Some(other) => {
            return Err(ServerError::BadRequest(format!(
                "unknown sort order: {other}"
            )));
        }
    };

    let filter = GameFilter {
        platform,
        installed: query.installed,
        engine: query.engine,
        skip: query.skip,
        take: query.take,
        sort,
        order,
    };

    let rows = GamesRepository::list(&state.db, &filter).await?;
    Ok(Json(rows))
}

async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<games::Model>, ServerError> {
    let game = GamesRepository::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("game {id} not found")))?;
    Ok(Json(game))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateGameBody {
    title: Option<String>,
    install_path: Option<String>,
    installed: Option<bool>,
    engine: Option<String>,
    last_played: Option<i64>,
}

async fn update_game(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateGameBody>,
) -> Result<Json<games::Model>, ServerError> {
    let updates = UpdateGame {
        title: body.title,
        install_path: body.install_path.map(Some),
        installed: body.installed,
        engine: body.engine.map(Some),
        last_played: body.last_played.map(Some),
    };

    let updated = GamesRepository::update(&state.db, id, updates)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("game {id} not found")))?;
    Ok(Json(updated))
}

#[derive(Serialize)]
struct DeleteResponse {
    deleted: u64,
}

async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteResponse>, ServerError> {
    let deleted = GamesRepository::delete(&state.db, id).await?;
    if deleted == 0 {
        return Err(ServerError::NotFound(format!("game {id} not found")));
    }
    Ok(Json(DeleteResponse { deleted }))
}
