use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::ModelError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Failures surfaced to HTTP clients as `{"detail": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing access token")]
    Unauthorized,
    #[error("Invalid access token")]
    Forbidden,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn result_not_found() -> Self { ApiError::NotFound("Result not found".into()) }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) | ServiceError::Model(ModelError::Validation(msg)) => ApiError::Validation(msg),
            ServiceError::NotFound(_) => ApiError::result_not_found(),
            ServiceError::Db(msg) | ServiceError::Model(ModelError::Db(msg)) => ApiError::Internal(msg),
        }
    }
}

// Extractor rejections share the `{"detail"}` body and report as 422.
impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self { ApiError::Validation(e.body_text()) }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self { ApiError::Validation(e.body_text()) }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self { ApiError::Validation(e.body_text()) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            ApiError::Internal(msg) => {
                error!(error = %msg, "request failed");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(serde_json::json!({"detail": detail}))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::Validation("limit".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (ServiceError::Model(ModelError::Validation("origin".into())), StatusCode::UNPROCESSABLE_ENTITY),
            (ServiceError::not_found("result"), StatusCode::NOT_FOUND),
            (ServiceError::Db("locked".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::Model(ModelError::Db("io".into())), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn auth_failures_keep_their_detail() {
        assert_eq!(ApiError::Unauthorized.to_string(), "Missing access token");
        assert_eq!(ApiError::Forbidden.to_string(), "Invalid access token");
        assert_eq!(ApiError::result_not_found().to_string(), "Result not found");
    }
}
