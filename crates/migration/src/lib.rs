//! Migrator registering one migration per collection.
pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_site_views;
mod m20240601_000002_create_apps_data;
mod m20240601_000003_create_site_settings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_site_views::Migration),
            Box::new(m20240601_000002_create_apps_data::Migration),
            Box::new(m20240601_000003_create_site_settings::Migration),
        ]
    }
}
