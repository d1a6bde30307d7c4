
use configs::DatabaseConfig;
use sea_orm::DatabaseConnection;

use crate::db::{connect_with_config, ensure_schema};

/// Fresh single-connection in-memory database with the schema in place.
pub async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    let mut cfg = DatabaseConfig::with_url("sqlite::memory:");
    // every pooled connection would get its own in-memory database
    cfg.max_connections = 1;
    cfg.min_connections = 1;
    let db = connect_with_config(&cfg).await?;
    ensure_schema(&db).await?;
    Ok(db)
}
