//! Create `apps_data` table.
//! Catalog entries; every attribute is free text and may be NULL.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AppsData::Table)
                    .if_not_exists()
                    .col(string_len(AppsData::Id, 64).primary_key())
                    .col(text_null(AppsData::Category))
                    .col(text_null(AppsData::Title))
                    .col(text_null(AppsData::Version))
                    .col(text_null(AppsData::Status))
                    .col(text_null(AppsData::Color))
                    .col(text_null(AppsData::Img))
                    .col(text_null(AppsData::Desc))
                    .col(text_null(AppsData::Link))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AppsData::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum AppsData {
    Table,
    Id,
    Category,
    Title,
    Version,
    Status,
    Color,
    Img,
    Desc,
    Link,
}
