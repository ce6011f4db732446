#![cfg(test)]
use sea_orm::DatabaseConnection;
use models::db::{connect_with_config, ensure_schema};
use configs::DatabaseConfig;

/// Fresh in-memory SQLite database with the schema applied.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..DatabaseConfig::default() };
    let db = connect_with_config(&cfg).await?;
    ensure_schema(&db).await?;
    Ok(db)
}

/// File-backed SQLite database in a fresh temp directory, pooled like production.
/// Returns the directory so the caller can remove it.
pub async fn get_file_db() -> Result<(DatabaseConnection, std::path::PathBuf), anyhow::Error> {
    static SEQ: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);
    let dir = std::env::temp_dir().join(format!(
        "result-store-svc-{}-{}",
        std::process::id(),
        SEQ.fetch_add(1, std::sync::atomic::Ordering::Relaxed)
    ));
    std::fs::create_dir_all(&dir)?;
    let cfg = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", dir.join("results.db").display()),
        ..DatabaseConfig::default()
    };
    let db = connect_with_config(&cfg).await?;
    ensure_schema(&db).await?;
    Ok((db, dir))
}
