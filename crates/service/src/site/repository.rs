use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::app_entry::{self, AppFields};
use models::{site_setting, site_view};

use crate::errors::ServiceError;

/// Storage seam for every record the site keeps.
#[async_trait]
pub trait SiteRepository: Send + Sync {
    async fn increment_views(&self) -> Result<i64, ServiceError>;
    async fn view_count(&self) -> Result<Option<i64>, ServiceError>;
    async fn set_view_count(&self, count: i64) -> Result<(), ServiceError>;
    async fn list_apps(&self) -> Result<Vec<app_entry::Model>, ServiceError>;
    async fn create_app(&self, fields: AppFields) -> Result<app_entry::Model, ServiceError>;
    async fn replace_app(&self, id: &str, fields: AppFields) -> Result<u64, ServiceError>;
    async fn delete_app(&self, id: &str) -> Result<bool, ServiceError>;
    async fn locker_enabled(&self) -> Result<Option<bool>, ServiceError>;
    async fn set_locker_enabled(&self, enabled: bool) -> Result<(), ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmSiteRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl SiteRepository for SeaOrmSiteRepository {
    async fn increment_views(&self) -> Result<i64, ServiceError> {
        Ok(site_view::increment(&self.db).await?)
    }

    async fn view_count(&self) -> Result<Option<i64>, ServiceError> {
        Ok(site_view::current(&self.db).await?)
    }

    async fn set_view_count(&self, count: i64) -> Result<(), ServiceError> {
        Ok(site_view::set_count(&self.db, count).await?)
    }

    async fn list_apps(&self) -> Result<Vec<app_entry::Model>, ServiceError> {
        Ok(app_entry::list(&self.db).await?)
    }

    async fn create_app(&self, fields: AppFields) -> Result<app_entry::Model, ServiceError> {
        Ok(app_entry::create(&self.db, fields).await?)
    }

    async fn replace_app(&self, id: &str, fields: AppFields) -> Result<u64, ServiceError> {
        Ok(app_entry::replace(&self.db, id, fields).await?)
    }

    async fn delete_app(&self, id: &str) -> Result<bool, ServiceError> {
        Ok(app_entry::delete(&self.db, id).await?)
    }

    async fn locker_enabled(&self) -> Result<Option<bool>, ServiceError> {
        Ok(site_setting::get_enabled(&self.db, site_setting::LOCKER_KEY).await?)
    }

    async fn set_locker_enabled(&self, enabled: bool) -> Result<(), ServiceError> {
        Ok(site_setting::set_enabled(&self.db, site_setting::LOCKER_KEY, enabled).await?)
    }
}
