use axum::Router;
use sales_api::{AppState, build_router};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

/// Set up a migrated in-memory SQLite database.
/// A single pooled connection keeps the in-memory database alive for the test.
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    migration::Migrator::up(&db, None).await?;

    Ok(db)
}

/// Router over a fresh database, plus a handle to that database.
pub async fn build_test_app() -> (Router, DatabaseConnection) {
    let db = setup_test_db().await.expect("Failed to set up test DB");
    let app = build_router(AppState { db: db.clone() });
    (app, db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_setup_test_db() {
        let db = setup_test_db().await;
        assert!(db.is_ok(), "Test database setup should succeed");
    }
}
