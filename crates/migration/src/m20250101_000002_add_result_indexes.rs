use sea_orm_migration::prelude::*;

use crate::m20250101_000001_create_result::Results;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Natural key: one row per (origin, label); upserts resolve conflicts on it
        manager
            .create_index(
                Index::create()
                    .name("uniq_result_origin_label")
                    .table(Results::Table)
                    .col(Results::Origin)
                    .col(Results::Label)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_result_label")
                    .table(Results::Table)
                    .col(Results::Label)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_result_last_updated")
                    .table(Results::Table)
                    .col(Results::LastUpdated)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_result_origin_label").table(Results::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_result_label").table(Results::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_result_last_updated").table(Results::Table).to_owned())
            .await
    }
}
