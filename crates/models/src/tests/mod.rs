use anyhow::Result;
use configs::DatabaseConfig;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use crate::db::{connect_with_config, ensure_schema};
use crate::errors::ModelError;
use crate::result;

/// Fresh in-memory SQLite database with the schema applied
async fn setup_test_db() -> Result<DatabaseConnection> {
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..DatabaseConfig::default() };
    let db = connect_with_config(&cfg).await?;
    ensure_schema(&db).await?;
    Ok(db)
}

#[test]
fn validate_rejects_blank_and_oversized_keys() {
    assert!(matches!(result::validate_origin(""), Err(ModelError::Validation(_))));
    assert!(matches!(result::validate_label("   "), Err(ModelError::Validation(_))));
    assert!(result::validate_label(&"x".repeat(100)).is_ok());
    assert!(result::validate_label(&"x".repeat(101)).is_err());
    // counted in characters, not bytes
    assert!(result::validate_origin(&"é".repeat(100)).is_ok());
}

#[tokio::test]
async fn upsert_inserts_then_overwrites_same_row() -> Result<()> {
    let db = setup_test_db().await?;

    let first = result::upsert(&db, "ci", "build_time", 12.3).await?;
    assert_eq!(first.id, 1);
    assert_eq!(first.value, 12.3);

    let second = result::upsert(&db, "ci", "build_time", 15.0).await?;
    assert_eq!(second.id, first.id);
    assert_eq!(second.value, 15.0);
    assert!(second.last_updated >= first.last_updated);

    assert_eq!(result::Entity::find().count(&db).await?, 1);
    Ok(())
}

#[tokio::test]
async fn upsert_keys_on_both_origin_and_label() -> Result<()> {
    let db = setup_test_db().await?;

    result::upsert(&db, "ci", "build_time", 1.0).await?;
    result::upsert(&db, "ci", "test_time", 2.0).await?;
    result::upsert(&db, "nightly", "build_time", 3.0).await?;

    assert_eq!(result::Entity::find().count(&db).await?, 3);
    let found = result::find_by_natural_key(&db, "nightly", "build_time").await?;
    assert_eq!(found.map(|r| r.value), Some(3.0));
    Ok(())
}

#[tokio::test]
async fn upsert_validates_before_writing() -> Result<()> {
    let db = setup_test_db().await?;

    let err = result::upsert(&db, "", "build_time", 1.0).await;
    assert!(matches!(err, Err(ModelError::Validation(_))));
    assert_eq!(result::Entity::find().count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn ensure_schema_is_idempotent() -> Result<()> {
    let db = setup_test_db().await?;
    result::upsert(&db, "ci", "build_time", 1.0).await?;

    ensure_schema(&db).await?;
    assert_eq!(result::Entity::find().count(&db).await?, 1);
    Ok(())
}
