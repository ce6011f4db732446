use std::sync::Arc;
use chrono::Utc;
use tracing::{info, instrument};

use common::metrics::{DELETES_TOTAL, UPSERTS_TOTAL};

use crate::db::result_service::UpsertOutcome;
use crate::errors::ServiceError;
use crate::pagination::ListQuery;
use crate::results::repository::ResultRepository;

/// Application service over stored results.
pub struct ResultService<R: ResultRepository> {
    repo: Arc<R>,
}

impl<R: ResultRepository> ResultService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn upsert(&self, origin: &str, label: &str, value: f64) -> Result<(models::result::Model, UpsertOutcome), ServiceError> {
        let (row, outcome) = self.repo.upsert(origin, label, value).await?;
        UPSERTS_TOTAL.with_label_values(&[outcome.as_str()]).inc();
        info!(id = row.id, outcome = outcome.as_str(), "result upserted");
        Ok((row, outcome))
    }

    /// Rows matching `query`, evaluated against the current time.
    pub async fn list(&self, query: ListQuery) -> Result<Vec<models::result::Model>, ServiceError> {
        let window = query.normalize(Utc::now())?;
        self.repo.list(&window).await
    }

    pub async fn get(&self, id: i32) -> Result<Option<models::result::Model>, ServiceError> { self.repo.get(id).await }

    /// Remove by id; `NotFound` when no row had that id.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("result"));
        }
        DELETES_TOTAL.inc();
        info!(id, "result deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::repository::SeaOrmResultRepository;
    use crate::test_support::get_db;

    async fn service() -> Result<ResultService<SeaOrmResultRepository>, anyhow::Error> {
        let db = get_db().await?;
        Ok(ResultService::new(Arc::new(SeaOrmResultRepository { db })))
    }

    #[tokio::test]
    async fn service_round_trip() -> Result<(), anyhow::Error> {
        let svc = service().await?;

        let (row, outcome) = svc.upsert("ci", "build_time", 12.3).await?;
        assert_eq!(outcome, UpsertOutcome::Inserted);

        let listed = svc.list(ListQuery { label: Some("build_time".into()), ..ListQuery::default() }).await?;
        assert_eq!(listed, vec![row.clone()]);

        assert_eq!(svc.get(row.id).await?, Some(row.clone()));
        svc.delete(row.id).await?;
        assert!(svc.get(row.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let err = svc.delete(42).await;
        assert!(matches!(err, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn list_rejects_oversized_limit() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let err = svc.list(ListQuery { limit: 500, ..ListQuery::default() }).await;
        assert!(matches!(err, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn upsert_surfaces_validation_errors() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let err = svc.upsert(&"o".repeat(101), "build_time", 1.0).await;
        assert!(matches!(err, Err(ServiceError::Model(models::errors::ModelError::Validation(_)))));
        Ok(())
    }
}
