//! Accounts repository — one stored Steam identity.

use sea_orm::*;

use crate::entity::accounts;
use crate::entity::prelude::*;

pub struct AccountsRepository;

impl AccountsRepository {
    /// Returns the stored account, if any.
    pub async fn get(db: &DatabaseConnection) -> Result<Option<accounts::Model>, DbErr> {
        Accounts::find().one(db).await
    }

    /// Stores the Steam ID, replacing any previous value.
    pub async fn set(db: &DatabaseConnection, steam_id: &str) -> Result<accounts::Model, DbErr> {
        let now = chrono::Utc::now().timestamp();

        match Self::get(db).await? {
            Some(existing) => {
                let active = accounts::ActiveModel {
                    id: Set(existing.id),
                    steam_id: Set(steam_id.to_string()),
                    updated_at: Set(now),
                    ..Default::default()
                };
                active.update(db).await
            }
            None => {
                let active = accounts::ActiveModel {
                    id: NotSet,
                    steam_id: Set(steam_id.to_string()),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                active.insert(db).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::test_db;

    #[tokio::test]
    async fn get_is_none_before_set() {
        let db = test_db().await;
        assert!(AccountsRepository::get(&db).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_then_get() {
        let db = test_db().await;
        AccountsRepository::set(&db, "76561198000000001").await.unwrap();
        let stored = AccountsRepository::get(&db).await.unwrap().unwrap();
        assert_eq!(stored.steam_id, "76561198000000001");
    }

    #[tokio::test]
    async fn set_replaces_previous_value() {
        let db = test_db().await;
        let first = AccountsRepository::set(&db, "111").await.unwrap();
        let second = AccountsRepository::set(&db, "222").await.unwrap();

        assert_eq!(first.id, second.id, "must stay a single row");
        assert_eq!(
            AccountsRepository::get(&db).await.unwrap().unwrap().steam_id,
            "222"
        );
    }
}
