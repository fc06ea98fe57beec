/// Counter, catalog and settings data-access tests
pub mod crud_tests;

use sea_orm::DatabaseConnection;
use tempfile::TempDir;

/// Fresh migrated SQLite file; keep the `TempDir` alive for the test's duration.
pub async fn temp_db() -> anyhow::Result<(TempDir, DatabaseConnection)> {
    let dir = tempfile::tempdir()?;
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("models.db").display());
    let db = crate::db::connect_url(&url).await?;
    Ok((dir, db))
}
