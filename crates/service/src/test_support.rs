#![cfg(test)]
use std::sync::Arc;

use tempfile::TempDir;

use crate::auth::AdminGuard;
use crate::site::{repository::SeaOrmSiteRepository, service::SiteService};

pub const TEST_PASSWORD: &str = "letmein";

/// Migrated SQLite file in a temp dir; the dir must outlive the service.
pub async fn sqlite_service() -> Result<(TempDir, SiteService<SeaOrmSiteRepository>), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("site.db").display());
    let db = models::db::connect_url(&url).await?;
    let repo = SeaOrmSiteRepository { db };
    let svc = SiteService::new(Some(Arc::new(repo)), AdminGuard::new(Some(TEST_PASSWORD.into())));
    Ok((dir, svc))
}
