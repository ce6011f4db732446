use chrono::{DateTime, Utc};
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Stored result as returned by every read and write
#[derive(ToSchema)]
pub struct ResultDoc {
    pub id: i32,
    pub origin: String,
    pub label: String,
    pub value: f64,
    pub last_updated: DateTime<Utc>,
}

#[derive(ToSchema)]
pub struct AckDoc { pub ok: bool }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::results::create,
        crate::routes::results::list,
        crate::routes::results::get,
        crate::routes::results::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ResultDoc,
            AckDoc,
            crate::routes::results::ResultCreate,
        )
    ),
    tags(
        (name = "health"),
        (name = "results")
    )
)]
pub struct ApiDoc;
