use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, instrument, warn};

use models::app_entry::{self, AppFields};

use crate::auth::AdminGuard;
use crate::errors::ServiceError;
use crate::site::input;
use crate::site::repository::SiteRepository;

/// Application service for the public counter, the catalog and the locker flag.
///
/// `repo` is `None` when no store could be opened: reads answer with their
/// defaults and writes fail with [`ServiceError::StoreUnavailable`].
pub struct SiteService<R: SiteRepository> {
    repo: Option<Arc<R>>,
    guard: AdminGuard,
}

impl<R: SiteRepository> SiteService<R> {
    pub fn new(repo: Option<Arc<R>>, guard: AdminGuard) -> Self { Self { repo, guard } }

    pub fn store_available(&self) -> bool { self.repo.is_some() }

    fn repo(&self) -> Result<&Arc<R>, ServiceError> {
        self.repo.as_ref().ok_or(ServiceError::StoreUnavailable)
    }

    /// Check the admin password without touching the store.
    pub fn login(&self, password: Option<&str>) -> Result<(), ServiceError> {
        self.guard.verify(password)
    }

    /// Count one visit and return the new total; 0 if the store fails.
    #[instrument(skip(self))]
    pub async fn record_visit(&self) -> i64 {
        let Some(repo) = self.repo.as_ref() else { return 0 };
        match repo.increment_views().await {
            Ok(count) => count,
            Err(e) => {
                error!(err = %e, "visit increment failed");
                0
            }
        }
    }

    /// Current total without mutation; 0 if absent or unreadable.
    pub async fn stats(&self) -> i64 {
        let Some(repo) = self.repo.as_ref() else { return 0 };
        match repo.view_count().await {
            Ok(count) => count.unwrap_or(0),
            Err(e) => {
                warn!(err = %e, "view count read failed");
                0
            }
        }
    }

    #[instrument(skip_all)]
    pub async fn set_view_count(&self, password: Option<&str>, new_count: Option<&Value>) -> Result<i64, ServiceError> {
        self.guard.verify(password)?;
        let count = input::view_count(new_count)?;
        self.repo()?.set_view_count(count).await?;
        info!(count, "view count set");
        Ok(count)
    }

    #[instrument(skip_all)]
    pub async fn reset_views(&self, password: Option<&str>) -> Result<(), ServiceError> {
        self.guard.verify(password)?;
        self.repo()?.set_view_count(0).await?;
        info!("view count reset");
        Ok(())
    }

    /// Whole catalog in store order; empty if the store is unavailable.
    pub async fn list_apps(&self) -> Vec<app_entry::Model> {
        let Some(repo) = self.repo.as_ref() else { return Vec::new() };
        match repo.list_apps().await {
            Ok(list) => list,
            Err(e) => {
                warn!(err = %e, "app list read failed");
                Vec::new()
            }
        }
    }

    #[instrument(skip_all)]
    pub async fn add_app(&self, password: Option<&str>, fields: AppFields) -> Result<String, ServiceError> {
        self.guard.verify(password)?;
        let created = self.repo()?.create_app(fields).await?;
        info!(id = %created.id, "app added");
        Ok(created.id)
    }

    /// Replace all attributes of an app. An unknown id is not an error; the
    /// returned flag tells whether a row was actually rewritten.
    #[instrument(skip_all)]
    pub async fn edit_app(&self, password: Option<&str>, id: Option<&Value>, fields: AppFields) -> Result<bool, ServiceError> {
        self.guard.verify(password)?;
        let id = input::app_id(id)?;
        let touched = self.repo()?.replace_app(&id, fields).await?;
        if touched == 0 {
            warn!(%id, "edit matched no app");
        } else {
            info!(%id, "app edited");
        }
        Ok(touched > 0)
    }

    #[instrument(skip_all)]
    pub async fn delete_app(&self, password: Option<&str>, id: Option<&Value>) -> Result<(), ServiceError> {
        self.guard.verify(password)?;
        let id = input::app_id(id)?;
        let removed = self.repo()?.delete_app(&id).await?;
        info!(%id, removed, "app delete");
        Ok(())
    }

    /// Locker flag; locked (`true`) when never written or unreadable.
    pub async fn locker_status(&self) -> bool {
        let Some(repo) = self.repo.as_ref() else { return true };
        match repo.locker_enabled().await {
            Ok(v) => v.unwrap_or(true),
            Err(e) => {
                warn!(err = %e, "locker read failed");
                true
            }
        }
    }

    #[instrument(skip_all)]
    pub async fn set_locker_status(&self, password: Option<&str>, enabled: Option<&Value>) -> Result<bool, ServiceError> {
        self.guard.verify(password)?;
        let enabled = input::flag(enabled)?;
        self.repo()?.set_locker_enabled(enabled).await?;
        info!(enabled, "locker updated");
        Ok(enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::repository::SeaOrmSiteRepository;
    use crate::test_support::{sqlite_service, TEST_PASSWORD};
    use models::errors::ModelError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashSet;

    const PW: Option<&str> = Some(TEST_PASSWORD);
    const WRONG: Option<&str> = Some("nope");

    fn fields(title: &str) -> AppFields {
        AppFields {
            category: Some("games".into()),
            title: Some(title.into()),
            version: Some("v3".into()),
            status: Some("ok".into()),
            color: Some("blue".into()),
            img: Some("/img/a.png".into()),
            desc: Some("desc".into()),
            link: Some("https://example.com/a".into()),
        }
    }

    /// Repository whose every call fails, standing in for a broken store.
    struct BrokenRepo;

    fn down() -> ServiceError {
        ModelError::Db("down".into()).into()
    }

    #[async_trait]
    impl SiteRepository for BrokenRepo {
        async fn increment_views(&self) -> Result<i64, ServiceError> { Err(down()) }
        async fn view_count(&self) -> Result<Option<i64>, ServiceError> { Err(down()) }
        async fn set_view_count(&self, _: i64) -> Result<(), ServiceError> { Err(down()) }
        async fn list_apps(&self) -> Result<Vec<app_entry::Model>, ServiceError> { Err(down()) }
        async fn create_app(&self, _: AppFields) -> Result<app_entry::Model, ServiceError> { Err(down()) }
        async fn replace_app(&self, _: &str, _: AppFields) -> Result<u64, ServiceError> { Err(down()) }
        async fn delete_app(&self, _: &str) -> Result<bool, ServiceError> { Err(down()) }
        async fn locker_enabled(&self) -> Result<Option<bool>, ServiceError> { Err(down()) }
        async fn set_locker_enabled(&self, _: bool) -> Result<(), ServiceError> { Err(down()) }
    }

    #[tokio::test]
    async fn concurrent_visits_count_exactly() -> anyhow::Result<()> {
        let (_dir, svc) = sqlite_service().await?;
        let svc = Arc::new(svc);

        let n = 25;
        let mut handles = Vec::new();
        for _ in 0..n {
            let svc = Arc::clone(&svc);
            handles.push(tokio::spawn(async move { svc.record_visit().await }));
        }
        let mut seen = HashSet::new();
        for h in handles {
            seen.insert(h.await?);
        }
        assert_eq!(seen.len(), n);
        assert_eq!(svc.stats().await, n as i64);
        Ok(())
    }

    #[tokio::test]
    async fn stats_never_mutates() -> anyhow::Result<()> {
        let (_dir, svc) = sqlite_service().await?;
        assert_eq!(svc.stats().await, 0);
        svc.record_visit().await;
        for _ in 0..5 {
            assert_eq!(svc.stats().await, 1);
        }
        Ok(())
    }

    #[tokio::test]
    async fn set_view_count_validates_input() -> anyhow::Result<()> {
        let (_dir, svc) = sqlite_service().await?;
        assert_eq!(svc.set_view_count(PW, Some(&json!(10))).await?, 10);

        let err = svc.set_view_count(PW, Some(&json!("lots"))).await.unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
        let err = svc.set_view_count(PW, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
        assert_eq!(svc.stats().await, 10);

        assert_eq!(svc.set_view_count(PW, Some(&json!("77"))).await?, 77);
        assert_eq!(svc.record_visit().await, 78);
        svc.reset_views(PW).await?;
        assert_eq!(svc.stats().await, 0);
        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_changes_nothing() -> anyhow::Result<()> {
        let (_dir, svc) = sqlite_service().await?;
        svc.set_view_count(PW, Some(&json!(5))).await?;
        let id = svc.add_app(PW, fields("Keep")).await?;
        svc.set_locker_status(PW, Some(&json!(false))).await?;

        assert!(matches!(svc.login(WRONG), Err(ServiceError::Unauthorized)));
        assert!(matches!(svc.set_view_count(WRONG, Some(&json!(99))).await, Err(ServiceError::Unauthorized)));
        assert!(matches!(svc.reset_views(WRONG).await, Err(ServiceError::Unauthorized)));
        assert!(matches!(svc.add_app(WRONG, fields("Intruder")).await, Err(ServiceError::Unauthorized)));
        assert!(matches!(svc.edit_app(WRONG, Some(&json!(id)), fields("Hacked")).await, Err(ServiceError::Unauthorized)));
        assert!(matches!(svc.delete_app(WRONG, Some(&json!(id))).await, Err(ServiceError::Unauthorized)));
        assert!(matches!(svc.set_locker_status(WRONG, Some(&json!(true))).await, Err(ServiceError::Unauthorized)));
        assert!(matches!(svc.set_view_count(None, Some(&json!(99))).await, Err(ServiceError::Unauthorized)));

        assert_eq!(svc.stats().await, 5);
        let apps = svc.list_apps().await;
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].title.as_deref(), Some("Keep"));
        assert!(!svc.locker_status().await);
        Ok(())
    }

    #[tokio::test]
    async fn add_then_list_has_all_fields_and_fresh_id() -> anyhow::Result<()> {
        let (_dir, svc) = sqlite_service().await?;
        let first = svc.add_app(PW, fields("One")).await?;
        let second = svc.add_app(PW, fields("Two")).await?;
        assert_ne!(first, second);

        let apps = svc.list_apps().await;
        let two = apps.iter().find(|a| a.id == second).expect("second listed");
        let f = fields("Two");
        assert_eq!(two.category, f.category);
        assert_eq!(two.title, f.title);
        assert_eq!(two.version, f.version);
        assert_eq!(two.status, f.status);
        assert_eq!(two.color, f.color);
        assert_eq!(two.img, f.img);
        assert_eq!(two.desc, f.desc);
        assert_eq!(two.link, f.link);
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_and_unknown_is_noop() -> anyhow::Result<()> {
        let (_dir, svc) = sqlite_service().await?;
        let id = svc.add_app(PW, fields("Gone")).await?;
        svc.delete_app(PW, Some(&json!(id))).await?;
        assert!(svc.list_apps().await.iter().all(|a| a.id != id));

        svc.delete_app(PW, Some(&json!("never-existed"))).await?;
        let err = svc.delete_app(PW, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
        Ok(())
    }

    // An edit against an unknown id still succeeds; the flag exposes the miss.
    #[tokio::test]
    async fn edit_unknown_id_reports_success_without_change() -> anyhow::Result<()> {
        let (_dir, svc) = sqlite_service().await?;
        let id = svc.add_app(PW, fields("Original")).await?;

        assert!(!svc.edit_app(PW, Some(&json!("missing")), fields("Ghost")).await?);
        assert!(svc.edit_app(PW, Some(&json!(id)), fields("Renamed")).await?);

        let apps = svc.list_apps().await;
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].title.as_deref(), Some("Renamed"));
        Ok(())
    }

    #[tokio::test]
    async fn locker_defaults_locked_then_tracks_writes() -> anyhow::Result<()> {
        let (_dir, svc) = sqlite_service().await?;
        assert!(svc.locker_status().await);
        assert!(!svc.set_locker_status(PW, Some(&json!(false))).await?);
        assert!(!svc.locker_status().await);
        assert!(svc.set_locker_status(PW, Some(&json!(true))).await?);
        assert!(svc.locker_status().await);
        let err = svc.set_locker_status(PW, Some(&json!("off"))).await.unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
        Ok(())
    }

    #[tokio::test]
    async fn missing_store_degrades_reads_and_fails_writes() {
        let svc: SiteService<SeaOrmSiteRepository> =
            SiteService::new(None, AdminGuard::new(Some(TEST_PASSWORD.into())));
        assert!(!svc.store_available());
        assert_eq!(svc.record_visit().await, 0);
        assert_eq!(svc.stats().await, 0);
        assert!(svc.list_apps().await.is_empty());
        assert!(svc.locker_status().await);
        assert!(svc.login(PW).is_ok());

        assert!(matches!(svc.reset_views(PW).await, Err(ServiceError::StoreUnavailable)));
        assert!(matches!(svc.add_app(PW, fields("x")).await, Err(ServiceError::StoreUnavailable)));
        // auth is checked before availability
        assert!(matches!(svc.reset_views(WRONG).await, Err(ServiceError::Unauthorized)));
    }

    #[tokio::test]
    async fn failing_store_degrades_reads() {
        let svc = SiteService::new(Some(Arc::new(BrokenRepo)), AdminGuard::new(Some(TEST_PASSWORD.into())));
        assert_eq!(svc.record_visit().await, 0);
        assert_eq!(svc.stats().await, 0);
        assert!(svc.list_apps().await.is_empty());
        assert!(svc.locker_status().await);
        assert!(matches!(svc.reset_views(PW).await, Err(ServiceError::Model(ModelError::Db(_)))));
    }
}
