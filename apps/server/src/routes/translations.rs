//! Translation CRUD, bulk operations, and export endpoints.

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use gamestringer_db::entity::translations;
use gamestringer_db::{
    GamesRepository, NewTranslation, TranslationFilter, TranslationsRepository, UpdateTranslation,
};
use gamestringer_export::{ExportFormat, ExportOptions};
use gamestringer_types::{TranslationEntry, TranslationStatus};

use crate::error::ServerError;
use crate::state::AppState;
use crate::validation::validate_text;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/translations", get(list).post(create))
        .route("/api/translations/export", get(export))
        .route("/api/translations/bulk", put(bulk_update).delete(bulk_delete))
        .route("/api/translations/import", post(import))
        .route(
            "/api/translations/{id}",
            get(get_one).put(update).delete(delete_one),
        )
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslationsQuery {
    game_id: Option<i32>,
    status: Option<String>,
    language: Option<String>,
    skip: Option<u64>,
    take: Option<u64>,
    format: Option<String>,
    source_lang: Option<String>,
    target_lang: Option<String>,
    #[serde(default)]
    include_empty: bool,
}

impl TranslationsQuery {
    fn to_filter(&self) -> Result<TranslationFilter, ServerError> {
        let status = self
            .status
            .as_deref()
            .map(|s| s.parse::<TranslationStatus>().map_err(ServerError::BadRequest))
            .transpose()?;

        Ok(TranslationFilter {
            game_id: self.game_id,
            status,
            language: self.language.clone(),
            skip: self.skip,
            take: self.take,
        })
    }
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<TranslationsQuery>,
) -> Result<Json<Vec<translations::Model>>, ServerError> {
    let filter = query.to_filter()?;
    let rows = TranslationsRepository::list(&state.db, &filter).await?;
    Ok(Json(rows))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslationBody {
    game_id: i32,
    file_path: String,
    source_text: String,
    translated_text: Option<String>,
    source_lang: String,
    target_lang: String,
    status: Option<TranslationStatus>,
    confidence: Option<f64>,
}

/// Accepts one record or a batch.
#[derive(Deserialize)]
#[serde(untagged)]
enum CreateBody {
    One(Box<TranslationBody>),
    Many(Vec<TranslationBody>),
}

async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateBody>,
) -> Result<Json<Vec<translations::Model>>, ServerError> {
    let bodies = match body {
        CreateBody::One(one) => vec![*one],
        CreateBody::Many(many) => many,
    };
    if bodies.is_empty() {
        return Err(ServerError::BadRequest("no translations supplied".into()));
    }

    let mut batch = Vec::with_capacity(bodies.len());
    for body in bodies {
        validate_text("sourceText", &body.source_text)?;
        if let Some(target) = &body.translated_text {
            validate_text("translatedText", target)?;
        }

        GamesRepository::find_by_id(&state.db, body.game_id)
            .await?
            .ok_or_else(|| ServerError::NotFound(format!("game {} not found", body.game_id)))?;

        batch.push(NewTranslation {
            game_id: body.game_id,
            file_path: body.file_path,
            source_text: body.source_text,
            translated_text: body.translated_text,
            source_lang: body.source_lang,
            target_lang: body.target_lang,
            status: body.status.unwrap_or(TranslationStatus::Pending),
            confidence: body.confidence,
        });
    }

    let created = TranslationsRepository::insert_many(&state.db, batch).await?;
    info!(count = created.len(), "created translations");
    Ok(Json(created))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<translations::Model>, ServerError> {
    let row = TranslationsRepository::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("translation {id} not found")))?;
    Ok(Json(row))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateBody {
    translated_text: Option<String>,
    status: Option<TranslationStatus>,
    confidence: Option<f64>,
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateBody>,
) -> Result<Json<translations::Model>, ServerError> {
    if let Some(target) = &body.translated_text {
        validate_text("translatedText", target)?;
    }

    // A text edit over the API is a manual edit by definition; the status
    // moves to `edited` unless the caller states otherwise.
    let manual = body.translated_text.is_some();
    let status = body
        .status
        .or(manual.then_some(TranslationStatus::Edited));

    let updates = UpdateTranslation {
        translated_text: body.translated_text.map(Some),
        status,
        confidence: body.confidence.map(Some),
        manual_edit: manual.then_some(true),
    };

    let updated = TranslationsRepository::update(&state.db, id, updates)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("translation {id} not found")))?;
    Ok(Json(updated))
}

#[derive(Serialize)]
struct AffectedResponse {
    affected: u64,
}

async fn delete_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<AffectedResponse>, ServerError> {
    let affected = TranslationsRepository::delete(&state.db, id).await?;
    if affected == 0 {
        return Err(ServerError::NotFound(format!("translation {id} not found")));
    }
    Ok(Json(AffectedResponse { affected }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BulkUpdateBody {
    ids: Vec<i32>,
    status: TranslationStatus,
}

async fn bulk_update(
    State(state): State<AppState>,
    Json(body): Json<BulkUpdateBody>,
) -> Result<Json<AffectedResponse>, ServerError> {
    if body.ids.is_empty() {
        return Err(ServerError::BadRequest("ids must not be empty".into()));
    }

    let affected =
        TranslationsRepository::bulk_update_status(&state.db, &body.ids, body.status).await?;
    info!(affected, status = %body.status, "bulk status update");
    Ok(Json(AffectedResponse { affected }))
}

#[derive(Deserialize)]
struct BulkDeleteBody {
    ids: Vec<i32>,
}

async fn bulk_delete(
    State(state): State<AppState>,
    Json(body): Json<BulkDeleteBody>,
) -> Result<Json<AffectedResponse>, ServerError> {
    if body.ids.is_empty() {
        return Err(ServerError::BadRequest("ids must not be empty".into()));
    }

    let affected = TranslationsRepository::bulk_delete(&state.db, &body.ids).await?;
    info!(affected, "bulk delete");
    Ok(Json(AffectedResponse { affected }))
}

async fn export(
    State(state): State<AppState>,
    Query(query): Query<TranslationsQuery>,
) -> Result<Response, ServerError> {
    let format: ExportFormat = query
        .format
        .as_deref()
        .ok_or_else(|| ServerError::BadRequest("missing 'format' parameter".into()))?
        .parse()
        .map_err(ServerError::BadRequest)?;

    let filter = query.to_filter()?;
    let rows = TranslationsRepository::list(&state.db, &filter).await?;

    let entries: Vec<TranslationEntry> = rows
        .iter()
        .map(|row| TranslationEntry {
            id: row.id.to_string(),
            source: row.source_text.clone(),
            target: row.translated_text.clone().unwrap_or_default(),
            context: Some(row.file_path.clone()),
            notes: None,
        })
        .collect();

    let options = ExportOptions {
        source_lang: query
            .source_lang
            .clone()
            .or_else(|| rows.first().map(|r| r.source_lang.clone()))
            .unwrap_or_else(|| "en".into()),
        target_lang: query
            .target_lang
            .clone()
            .or_else(|| rows.first().map(|r| r.target_lang.clone()))
            .unwrap_or_else(|| "en".into()),
        include_empty: query.include_empty,
        ..Default::default()
    };

    let content = match format {
        ExportFormat::Csv => gamestringer_export::to_csv(&entries, &options),
        ExportFormat::Xliff => gamestringer_export::to_xliff(&entries, &options),
        ExportFormat::Po => gamestringer_export::to_po(&entries, &options),
        ExportFormat::Json => gamestringer_export::to_json(&entries, &options),
    };

    let disposition = format!(
        "attachment; filename=\"translations.{}\"",
        format.extension()
    );
    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        content,
    )
        .into_response())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportQuery {
    game_id: i32,
    format: String,
    source_lang: Option<String>,
    target_lang: Option<String>,
}

/// Imports a CSV or PO document as translation rows for one game.
///
/// Entries with a target are stored as `completed`, the rest as `pending`.
async fn import(
    State(state): State<AppState>,
    Query(query): Query<ImportQuery>,
    body: String,
) -> Result<Json<AffectedResponse>, ServerError> {
    let format: ExportFormat = query.format.parse().map_err(ServerError::BadRequest)?;

    GamesRepository::find_by_id(&state.db, query.game_id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("game {} not found", query.game_id)))?;

    let entries = match format {
        ExportFormat::Csv => gamestringer_export::from_csv(&body),
        ExportFormat::Po => gamestringer_export::from_po(&body),
        _ => {
            return Err(ServerError::BadRequest(format!(
                "import supports csv and po, not {}",
                format.extension()
            )));
        }
    }
    .map_err(|e| ServerError::BadRequest(e.to_string()))?;

    let source_lang = query.source_lang.unwrap_or_else(|| "en".into());
    let target_lang = query.target_lang.unwrap_or_else(|| "en".into());

    let mut batch = Vec::with_capacity(entries.len());
    for entry in entries {
        validate_text("source", &entry.source)?;
        validate_text("target", &entry.target)?;

        let has_target = !entry.target.trim().is_empty();
        batch.push(NewTranslation {
            game_id: query.game_id,
            file_path: entry.context.unwrap_or_default(),
            source_text: entry.source,
            translated_text: has_target.then_some(entry.target),
            source_lang: source_lang.clone(),
            target_lang: target_lang.clone(),
            status: if has_target {
                TranslationStatus::Completed
            } else {
                TranslationStatus::Pending
            },
            confidence: None,
        });
    }

    let created = TranslationsRepository::insert_many(&state.db, batch).await?;
    info!(count = created.len(), game_id = query.game_id, "imported translations");
    Ok(Json(AffectedResponse {
        affected: created.len() as u64,
    }))
}
