//! Create `site_views` table.
//! Holds the single global visit counter row.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SiteViews::Table)
                    .if_not_exists()
                    .col(string_len(SiteViews::Id, 64).primary_key())
                    .col(big_integer(SiteViews::Count).not_null().default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(SiteViews::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum SiteViews { Table, Id, Count }
