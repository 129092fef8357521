//! Translation rows — one per translatable string per game file.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "translations")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub game_id: i32,
    pub file_path: String,
    #[sea_orm(column_type = "Text")]
    pub source_text: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub translated_text: Option<String>,
    pub source_lang: String,
    pub target_lang: String,
    pub status: String,
    pub confidence: Option<f64>,
    pub manual_edit: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::games::Entity",
        from = "Column::GameId",
        to = "super::games::Column::Id",
        on_delete = "Cascade"
    )]
    Game,
    #[sea_orm(has_many = "super::ai_suggestions::Entity")]
    AiSuggestions,
}

impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl Related<super::ai_suggestions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AiSuggestions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
