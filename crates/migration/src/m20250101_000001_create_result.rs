//! Create `result` table.
//! One row per (origin, label) with its latest value and refresh time.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Results::Table)
                    .if_not_exists()
                    .col(pk_auto(Results::Id))
                    .col(string_len(Results::Origin, 100).not_null())
                    .col(string_len(Results::Label, 100).not_null())
                    .col(double(Results::Value).not_null())
                    .col(timestamp_with_time_zone(Results::LastUpdated).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Results::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Results {
    #[sea_orm(iden = "result")]
    Table,
    Id,
    Origin,
    Label,
    Value,
    LastUpdated,
}
