use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::results::{repository::SeaOrmResultRepository, service::ResultService};

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub access_token: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub results: Arc<ResultService<SeaOrmResultRepository>>,
    pub auth: Arc<ServerAuthConfig>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, access_token: impl Into<String>) -> Self {
        let repo = Arc::new(SeaOrmResultRepository { db });
        Self {
            results: Arc::new(ResultService::new(repo)),
            auth: Arc::new(ServerAuthConfig { access_token: access_token.into() }),
        }
    }
}
