//! AI suggestions repository — batch replace and lookup.

use sea_orm::*;

use crate::dto::NewSuggestion;
use crate::entity::ai_suggestions;
use crate::entity::prelude::*;

pub struct SuggestionsRepository;

impl SuggestionsRepository {
    /// Replaces a translation's suggestion batch atomically.
    ///
    /// The previous batch is deleted so regeneration never accumulates
    /// stale proposals.
    pub async fn replace_batch(
        db: &DatabaseConnection,
        translation_id: i32,
        batch: Vec<NewSuggestion>,
    ) -> Result<Vec<ai_suggestions::Model>, DbErr> {
        let txn = db.begin().await?;
        let now = chrono::Utc::now().timestamp();

        AiSuggestions::delete_many()
            .filter(ai_suggestions::Column::TranslationId.eq(translation_id))
            .exec(&txn)
            .await?;

        let mut models = Vec::with_capacity(batch.len());
        for suggestion in batch {
            let active = ai_suggestions::ActiveModel {
                id: NotSet,
                translation_id: Set(translation_id),
                suggested_text: Set(suggestion.suggested_text),
                confidence: Set(suggestion.confidence),
                provider: Set(suggestion.provider),
                created_at: Set(now),
            };
            models.push(active.insert(&txn).await?);
        }

        txn.commit().await?;
        Ok(models)
    }

    /// Lists a translation's suggestions, best confidence first.
    pub async fn list_for(
        db: &DatabaseConnection,
        translation_id: i32,
    ) -> Result<Vec<ai_suggestions::Model>, DbErr> {
        AiSuggestions::find()
            .filter(ai_suggestions::Column::TranslationId.eq(translation_id))
            .order_by_desc(ai_suggestions::Column::Confidence)
            .all(db)
            .await
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Option<ai_suggestions::Model>, DbErr> {
        AiSuggestions::find_by_id(id).one(db).await
    }

    /// Deletes every suggestion attached to a translation.
    pub async fn delete_for(db: &DatabaseConnection, translation_id: i32) -> Result<u64, DbErr> {
        let result = AiSuggestions::delete_many()
            .filter(ai_suggestions::Column::TranslationId.eq(translation_id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}
