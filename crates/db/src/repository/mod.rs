pub mod accounts_repository;
pub mod games_repository;
pub mod suggestions_repository;
pub mod translations_repository;

#[cfg(test)]
pub(crate) mod test_support {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database, DatabaseConnection};

    /// Opens an in-memory SQLite database with the full schema applied.
    ///
    /// A single pooled connection keeps every query on the same in-memory
    /// database.
    pub async fn test_db() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:".to_string());
        options.max_connections(1).sqlx_logging(false);
        let db = Database::connect(options).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }
}
