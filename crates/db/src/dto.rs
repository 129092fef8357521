//! Data-transfer structs for repository calls.
//!
//! Partial-update DTOs use `Option` per field: `None` leaves the column
//! untouched, `Some` sets it. Nullable columns nest a second `Option` so a
//! caller can explicitly clear them.

use serde::{Deserialize, Serialize};

use gamestringer_types::TranslationStatus;

/// Sort key for game listings.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    #[default]
    Title,
    LastPlayed,
    Added,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Filters and pagination for game listings.
#[derive(Debug, Clone, Default)]
pub struct GameFilter {
    pub platform: Option<String>,
    pub installed: Option<bool>,
    pub engine: Option<String>,
    pub skip: Option<u64>,
    pub take: Option<u64>,
    pub sort: SortOption,
    pub order: SortOrder,
}

/// Partial update for a game row.
#[derive(Debug, Clone, Default)]
pub struct UpdateGame {
    pub title: Option<String>,
    pub install_path: Option<Option<String>>,
    pub installed: Option<bool>,
    pub engine: Option<Option<String>>,
    pub last_played: Option<Option<i64>>,
}

/// A translation row to insert.
#[derive(Debug, Clone)]
pub struct NewTranslation {
    pub game_id: i32,
    pub file_path: String,
    pub source_text: String,
    pub translated_text: Option<String>,
    pub source_lang: String,
    pub target_lang: String,
    pub status: TranslationStatus,
    pub confidence: Option<f64>,
}

/// Partial update for a translation row.
#[derive(Debug, Clone, Default)]
pub struct UpdateTranslation {
    pub translated_text: Option<Option<String>>,
    pub status: Option<TranslationStatus>,
    pub confidence: Option<Option<f64>>,
    pub manual_edit: Option<bool>,
}

/// Filters and pagination for translation listings.
#[derive(Debug, Clone, Default)]
pub struct TranslationFilter {
    pub game_id: Option<i32>,
    pub status: Option<TranslationStatus>,
    pub language: Option<String>,
    pub skip: Option<u64>,
    pub take: Option<u64>,
}

/// A suggestion to insert into a translation's batch.
#[derive(Debug, Clone)]
pub struct NewSuggestion {
    pub suggested_text: String,
    pub confidence: f64,
    pub provider: String,
}
