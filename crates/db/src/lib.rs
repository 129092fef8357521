//! SeaORM persistence layer.
//!
//! Entities mirror the migration schema; repositories expose the CRUD
//! surface the HTTP API needs. All repository functions take a
//! `&DatabaseConnection` so callers control pooling and transactions.

pub mod connection;
pub mod dto;
pub mod entity;
pub mod repository;

pub use connection::connect;
pub use dto::{
    GameFilter, NewSuggestion, NewTranslation, SortOption, SortOrder, TranslationFilter,
    UpdateGame, UpdateTranslation,
};
pub use repository::accounts_repository::AccountsRepository;
pub use repository::games_repository::GamesRepository;
pub use repository::suggestions_repository::SuggestionsRepository;
pub use repository::translations_repository::TranslationsRepository;

pub use sea_orm::{DatabaseConnection, DbErr};
