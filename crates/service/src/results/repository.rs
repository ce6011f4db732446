use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::db::result_service::{self, UpsertOutcome};
use crate::errors::ServiceError;
use crate::pagination::Window;

#[async_trait]
pub trait ResultRepository: Send + Sync {
    async fn upsert(&self, origin: &str, label: &str, value: f64) -> Result<(models::result::Model, UpsertOutcome), ServiceError>;
    async fn list(&self, window: &Window) -> Result<Vec<models::result::Model>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<models::result::Model>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmResultRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ResultRepository for SeaOrmResultRepository {
    async fn upsert(&self, origin: &str, label: &str, value: f64) -> Result<(models::result::Model, UpsertOutcome), ServiceError> {
        result_service::upsert_result(&self.db, origin, label, value).await
    }

    async fn list(&self, window: &Window) -> Result<Vec<models::result::Model>, ServiceError> {
        result_service::list_results(&self.db, window).await
    }

    async fn get(&self, id: i32) -> Result<Option<models::result::Model>, ServiceError> {
        result_service::get_result(&self.db, id).await
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        result_service::delete_result(&self.db, id).await
    }
}
