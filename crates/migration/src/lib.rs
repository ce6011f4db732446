//! Migrator creating the `result` table and its indexes.
//! Every step is `IF NOT EXISTS`, so running it on each startup is safe.
pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_result;
mod m20250101_000002_add_result_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_result::Migration),
            // Indexes should always be applied last
            Box::new(m20250101_000002_add_result_indexes::Migration),
        ]
    }
}
