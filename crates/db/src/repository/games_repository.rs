//! Games repository — upsert-driven by the refresh pipeline, plus the
//! conventional CRUD the HTTP API exposes.

use sea_orm::*;

use gamestringer_types::LibraryGame;

use crate::dto::{GameFilter, SortOption, SortOrder, UpdateGame};
use crate::entity::games;
use crate::entity::prelude::*;

pub struct GamesRepository;

impl GamesRepository {
    /// Inserts or updates a game, matching on (app_id, platform).
    pub async fn upsert(db: &DatabaseConnection, game: &LibraryGame) -> Result<games::Model, DbErr> {
        let now = chrono::Utc::now().timestamp();

        let existing = Games::find()
            .filter(games::Column::AppId.eq(game.app_id as i64))
            .filter(games::Column::Platform.eq(game.platform.as_str()))
            .one(db)
            .await?;

        let last_played = (game.last_played != 0).then_some(game.last_played);

        match existing {
            Some(model) => {
                let active = games::ActiveModel {
                    id: Set(model.id),
                    title: Set(game.title.clone()),
                    install_path: Set(game.install_path.clone()),
                    installed: Set(game.installed),
                    shared: Set(game.shared),
                    vr: Set(game.vr),
                    engine: Set(game.engine.clone()),
                    last_played: Set(last_played),
                    updated_at: Set(now),
                    ..Default::default()
                };
                active.update(db).await
            }
            None => {
                let active = games::ActiveModel {
                    id: NotSet,
                    app_id: Set(game.app_id as i64),
                    title: Set(game.title.clone()),
                    platform: Set(game.platform.as_str().to_string()),
                    install_path: Set(game.install_path.clone()),
                    installed: Set(game.installed),
                    shared: Set(game.shared),
                    vr: Set(game.vr),
                    engine: Set(game.engine.clone()),
                    last_played: Set(last_played),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                active.insert(db).await
            }
        }
    }

    /// Upserts a whole refresh result. Returns the number of rows written.
    pub async fn upsert_all(db: &DatabaseConnection, games: &[LibraryGame]) -> Result<u64, DbErr> {
        let mut count = 0u64;
        for game in games {
            Self::upsert(db, game).await?;
            count += 1;
        }
        Ok(count)
    }

    /// Lists games with filters, sorting, and pagination.
    pub async fn list(
        db: &DatabaseConnection,
        filter: &GameFilter,
    ) -> Result<Vec<games::Model>, DbErr> {
        let mut query = Games::find();

        if let Some(platform) = &filter.platform {
            query = query.filter(games::Column::Platform.eq(platform.as_str()));
        }
        if let Some(installed) = filter.installed {
            query = query.filter(games::Column::Installed.eq(installed));
        }
        if let Some(engine) = &filter.engine {
            query = query.filter(games::Column::Engine.eq(engine.as_str()));
        }

        let order = match filter.order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };
        query = match filter.sort {
            SortOption::Title => query.order_by(games::Column::Title, order),
            SortOption::LastPlayed => query.order_by(games::Column::LastPlayed, order),
            SortOption::Added => query.order_by(games::Column::Id, order),
        };

        if let Some(skip) = filter.skip {
            query = query.offset(skip);
        }
        if let Some(take) = filter.take {
            query = query.limit(take);
        }

        query.all(db).await
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Option<games::Model>, DbErr> {
        Games::find_by_id(id).one(db).await
    }

    /// Applies a partial update. Returns `None` when the row is missing.
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        updates: UpdateGame,
    ) -> Result<Option<games::Model>, DbErr> {
        if Self::find_by_id(db, id).await?.is_none() {
            return Ok(None);
        }

        let active = games::ActiveModel {
            id: Set(id),
            title: updates.title.map_or(NotSet, Set),
            install_path: updates.install_path.map_or(NotSet, Set),
            installed: updates.installed.map_or(NotSet, Set),
            engine: updates.engine.map_or(NotSet, Set),
            last_played: updates.last_played.map_or(NotSet, Set),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        active.update(db).await.map(Some)
    }

    /// Deletes one game. Returns the number of rows removed (0 or 1).
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<u64, DbErr> {
        let result = Games::delete_by_id(id).exec(db).await?;
        Ok(result.rows_affected)
    }

    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Games::find().count(db).await
    }
}
