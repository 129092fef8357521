//! AI suggestion rows — batches of machine proposals per translation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ai_suggestions")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub translation_id: i32,
    #[sea_orm(column_type = "Text")]
    pub suggested_text: String,
    pub confidence: f64,
    pub provider: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::translations::Entity",
        from = "Column::TranslationId",
        to = "super::translations::Column::Id",
        on_delete = "Cascade"
    )]
    Translation,
}

impl Related<super::translations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Translation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
