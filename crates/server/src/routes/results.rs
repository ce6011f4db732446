use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use common::types::Ack;
use models::result;
use service::pagination::{ListQuery, DEFAULT_LIMIT, DEFAULT_MAX_AGE_MIN};

use crate::errors::ApiError;
use crate::state::ServerState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ResultCreate {
    pub origin: String,
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Only results with this label
    pub label: Option<String>,
    /// Skip results not updated within this many minutes (default 30)
    #[serde(rename = "maxAgeMin")]
    pub max_age_min: Option<i64>,
    /// Rows to skip (default 0)
    pub offset: Option<u64>,
    /// Rows to return, at most 100 (default 100)
    pub limit: Option<u64>,
}

impl From<ListParams> for ListQuery {
    fn from(p: ListParams) -> Self {
        ListQuery {
            label: p.label,
            max_age_min: p.max_age_min.unwrap_or(DEFAULT_MAX_AGE_MIN),
            offset: p.offset.unwrap_or(0),
            limit: p.limit.unwrap_or(DEFAULT_LIMIT),
        }
    }
}

#[utoipa::path(
    post, path = "/results/", tag = "results",
    request_body = ResultCreate,
    params(("access-token" = String, Header, description = "Shared access token")),
    responses(
        (status = 200, description = "Inserted or updated", body = crate::openapi::ResultDoc),
        (status = 401, description = "Missing access token"),
        (status = 403, description = "Invalid access token"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    input: Result<Json<ResultCreate>, JsonRejection>,
) -> Result<Json<result::Model>, ApiError> {
    let Json(input) = input?;
    let (row, _) = state.results.upsert(&input.origin, &input.label, input.value).await?;
    Ok(Json(row))
}

#[utoipa::path(
    get, path = "/results/", tag = "results",
    params(ListParams),
    responses(
        (status = 200, description = "Recent results ordered by origin", body = [crate::openapi::ResultDoc]),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<result::Model>>, ApiError> {
    let Query(params) = params?;
    let rows = state.results.list(params.into()).await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get, path = "/results/{id}", tag = "results",
    params(("id" = i32, Path, description = "Result id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ResultDoc),
        (status = 404, description = "Result not found"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<result::Model>, ApiError> {
    let Path(id) = id?;
    state
        .results
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(ApiError::result_not_found)
}

#[utoipa::path(
    delete, path = "/results/{id}", tag = "results",
    params(
        ("id" = i32, Path, description = "Result id"),
        ("access-token" = String, Header, description = "Shared access token")
    ),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::AckDoc),
        (status = 401, description = "Missing access token"),
        (status = 403, description = "Invalid access token"),
        (status = 404, description = "Result not found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Ack>, ApiError> {
    let Path(id) = id?;
    state.results.delete(id).await?;
    Ok(Json(Ack { ok: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_fall_back_to_defaults() {
        let q: ListQuery = ListParams::default().into();
        assert_eq!(q.max_age_min, 30);
        assert_eq!(q.offset, 0);
        assert_eq!(q.limit, 100);
        assert!(q.label.is_none());
    }
}
