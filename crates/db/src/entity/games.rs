//! Game rows — one per (external store id, platform) pair.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub app_id: i64,
    pub title: String,
    pub platform: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub install_path: Option<String>,
    pub installed: bool,
    pub shared: bool,
    pub vr: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub engine: Option<String>,
    pub last_played: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::translations::Entity")]
    Translations,
}

impl Related<super::translations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Translations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
