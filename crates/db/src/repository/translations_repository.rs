//! Translations repository — CRUD plus the bulk operations the review UI
//! drives (status sweeps, mass deletes).

use sea_orm::sea_query::Expr;
use sea_orm::*;

use gamestringer_types::TranslationStatus;

use crate::dto::{NewTranslation, TranslationFilter, UpdateTranslation};
use crate::entity::prelude::*;
use crate::entity::translations;

pub struct TranslationsRepository;

impl TranslationsRepository {
    pub async fn insert(
        db: &DatabaseConnection,
        new: NewTranslation,
    ) -> Result<translations::Model, DbErr> {
        let now = chrono::Utc::now().timestamp();
        let active = translations::ActiveModel {
            id: NotSet,
            game_id: Set(new.game_id),
            file_path: Set(new.file_path),
            source_text: Set(new.source_text),
            translated_text: Set(new.translated_text),
            source_lang: Set(new.source_lang),
            target_lang: Set(new.target_lang),
            status: Set(new.status.as_str().to_string()),
            confidence: Set(new.confidence),
            manual_edit: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };
        active.insert(db).await
    }

    /// Inserts a batch atomically.
    pub async fn insert_many(
        db: &DatabaseConnection,
        batch: Vec<NewTranslation>,
    ) -> Result<Vec<translations::Model>, DbErr> {
        let txn = db.begin().await?;
        let mut models = Vec::with_capacity(batch.len());
        let now = chrono::Utc::now().timestamp();

        for new in batch {
            let active = translations::ActiveModel {
                id: NotSet,
                game_id: Set(new.game_id),
                file_path: Set(new.file_path),
                source_text: Set(new.source_text),
                translated_text: Set(new.translated_text),
                source_lang: Set(new.source_lang),
                target_lang: Set(new.target_lang),
                status: Set(new.status.as_str().to_string()),
                confidence: Set(new.confidence),
                manual_edit: Set(false),
                created_at: Set(now),
                updated_at: Set(now),
            };
            models.push(active.insert(&txn).await?);
        }

        txn.commit().await?;
        Ok(models)
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Option<translations::Model>, DbErr> {
        Translations::find_by_id(id).one(db).await
    }

    /// Lists translations with filters and pagination, newest first.
    pub async fn list(
        db: &DatabaseConnection,
        filter: &TranslationFilter,
    ) -> Result<Vec<translations::Model>, DbErr> {
        let mut query = Translations::find();

        if let Some(game_id) = filter.game_id {
            query = query.filter(translations::Column::GameId.eq(game_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(translations::Column::Status.eq(status.as_str()));
        }
        if let Some(language) = &filter.language {
            query = query.filter(translations::Column::TargetLang.eq(language.as_str()));
        }

        query = query.order_by_desc(translations::Column::Id);

        if let Some(skip) = filter.skip {
            query = query.offset(skip);
        }
        if let Some(take) = filter.take {
            query = query.limit(take);
        }

        query.all(db).await
    }

    /// Applies a partial update. Returns `None` when the row is missing.
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        updates: UpdateTranslation,
    ) -> Result<Option<translations::Model>, DbErr> {
        if Self::find_by_id(db, id).await?.is_none() {
            return Ok(None);
        }

        let active = translations::ActiveModel {
            id: Set(id),
            translated_text: updates.translated_text.map_or(NotSet, Set),
            status: updates
                .status
                .map_or(NotSet, |s| Set(s.as_str().to_string())),
            confidence: updates.confidence.map_or(NotSet, Set),
            manual_edit: updates.manual_edit.map_or(NotSet, Set),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        active.update(db).await.map(Some)
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<u64, DbErr> {
        let result = Translations::delete_by_id(id).exec(db).await?;
        Ok(result.rows_affected)
    }

    /// Sets the status for every row in `ids`. Returns the affected count.
    pub async fn bulk_update_status(
        db: &DatabaseConnection,
        ids: &[i32],
        status: TranslationStatus,
    ) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = Translations::update_many()
            .col_expr(
                translations::Column::Status,
                Expr::value(status.as_str()),
            )
            .col_expr(
                translations::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(translations::Column::Id.is_in(ids.to_vec()))
            .exec(db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes every row in `ids`. Returns the affected count.
    pub async fn bulk_delete(db: &DatabaseConnection, ids: &[i32]) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = Translations::delete_many()
            .filter(translations::Column::Id.is_in(ids.to_vec()))
            .exec(db)
            .await?;

        Ok(result.rows_affected)
    }
}
