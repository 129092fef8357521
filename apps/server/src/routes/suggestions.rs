//! AI suggestion endpoints: batch attach, list, accept.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use gamestringer_db::entity::{ai_suggestions, translations};
use gamestringer_db::{
    NewSuggestion, SuggestionsRepository, TranslationsRepository, UpdateTranslation,
};
use gamestringer_types::TranslationStatus;

use crate::error::ServerError;
use crate::state::AppState;
use crate::validation::validate_text;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/translations/{id}/suggestions",
            get(list_suggestions).post(attach_batch),
        )
        .route("/api/suggestions/{id}/accept", post(accept))
}

async fn list_suggestions(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ai_suggestions::Model>>, ServerError> {
    require_translation(&state, id).await?;
    let rows = SuggestionsRepository::list_for(&state.db, id).await?;
    Ok(Json(rows))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestionBody {
    suggested_text: String,
    confidence: f64,
    provider: String,
}

#[derive(Deserialize)]
struct AttachBody {
    suggestions: Vec<SuggestionBody>,
}

/// Replaces the translation's suggestion batch.
async fn attach_batch(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<AttachBody>,
) -> Result<Json<Vec<ai_suggestions::Model>>, ServerError> {
    if body.suggestions.is_empty() {
        return Err(ServerError::BadRequest("suggestions must not be empty".into()));
    }
    require_translation(&state, id).await?;

    let mut batch = Vec::with_capacity(body.suggestions.len());
    for suggestion in body.suggestions {
        validate_text("suggestedText", &suggestion.suggested_text)?;
        if !(0.0..=1.0).contains(&suggestion.confidence) {
            return Err(ServerError::BadRequest(
                "confidence must be between 0 and 1".into(),
            ));
        }
        batch.push(NewSuggestion {
            suggested_text: suggestion.suggested_text,
            confidence: suggestion.confidence,
            provider: suggestion.provider,
        });
    }

    let created = SuggestionsRepository::replace_batch(&state.db, id, batch).await?;
    info!(translation_id = id, count = created.len(), "attached suggestion batch");
    Ok(Json(created))
}

/// Accepts a suggestion into its parent translation.
async fn accept(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<translations::Model>, ServerError> {
    let suggestion = SuggestionsRepository::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("suggestion {id} not found")))?;

    let updates = UpdateTranslation {
        translated_text: Some(Some(suggestion.suggested_text.clone())),
        status: Some(TranslationStatus::Completed),
        confidence: Some(Some(suggestion.confidence)),
        manual_edit: Some(false),
    };

    let updated = TranslationsRepository::update(&state.db, suggestion.translation_id, updates)
        .await?
        .ok_or_else(|| {
            ServerError::NotFound(format!(
                "translation {} not found",
                suggestion.translation_id
            ))
        })?;

    info!(
        suggestion_id = id,
        translation_id = suggestion.translation_id,
        provider = %suggestion.provider,
        "accepted suggestion"
    );
    Ok(Json(updated))
}

async fn require_translation(state: &AppState, id: i32) -> Result<(), ServerError> {
    TranslationsRepository::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("translation {id} not found")))?;
    Ok(())
}
