//! Connection pool setup and startup schema initialization

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use sea_orm_migration::MigratorTrait;

use crate::config::Config;

/// Open the pool lazily so an unreachable database does not block startup.
/// Only a malformed connection string fails here; an unreachable database
/// surfaces per query once `acquire_timeout` elapses.
pub async fn connect(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.connection_url());
    options
        .connect_lazy(true)
        .acquire_timeout(config.acquire_timeout);

    Database::connect(options).await
}

/// Run a trivial query on one pooled connection and return the database time.
pub async fn check_connection(db: &DatabaseConnection) -> Result<String, DbErr> {
    let row = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            "SELECT CAST(CURRENT_TIMESTAMP AS TEXT) AS now",
        ))
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("liveness query returned no row".to_string()))?;

    row.try_get::<String>("", "now")
}

/// Liveness check followed by schema creation. Failures are logged, never fatal.
pub async fn initialize(db: &DatabaseConnection) {
    match check_connection(db).await {
        Ok(now) => tracing::info!(now = %now, "Connected to database"),
        Err(e) => tracing::error!(error = %e, "Database liveness check failed"),
    }

    tracing::info!("Running migrations...");
    match migration::Migrator::up(db, None).await {
        Ok(()) => tracing::info!("Sales table created or already exists"),
        Err(e) => tracing::error!(error = %e, "Failed to create sales table"),
    }
}
