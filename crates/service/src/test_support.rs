#![cfg(test)]
use configs::DatabaseConfig;
use models::db::{connect_with_config, ensure_schema};
use sea_orm::DatabaseConnection;

/// Fresh in-memory SQLite database per test, schema ensured.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let mut cfg = DatabaseConfig::with_url("sqlite::memory:");
    // a second pooled connection would see a different, empty database
    cfg.max_connections = 1;
    cfg.min_connections = 1;
    let db = connect_with_config(&cfg).await?;
    ensure_schema(&db).await?;
    Ok(db)
}
