use axum::{extract::{Request, State}, middleware::Next, response::Response};

use common::metrics::AUTH_REJECTIONS_TOTAL;

use crate::errors::ApiError;
use crate::state::ServerState;

/// Header names carrying the shared secret. HTTP clients usually send the
/// dashed form; the underscored one is accepted as well.
pub const ACCESS_TOKEN_HEADERS: [&str; 2] = ["access-token", "access_token"];

/// Middleware: require the shared access token on mutating routes.
/// Missing header → 401, any other value than the configured token → 403.
pub async fn require_access_token(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = ACCESS_TOKEN_HEADERS
        .iter()
        .find_map(|name| req.headers().get(*name));

    let Some(value) = presented else {
        AUTH_REJECTIONS_TOTAL.with_label_values(&["missing"]).inc();
        tracing::warn!(path = %req.uri().path(), method = %req.method(), "missing access token");
        return Err(ApiError::Unauthorized);
    };

    if value.as_bytes() != state.auth.access_token.as_bytes() {
        AUTH_REJECTIONS_TOTAL.with_label_values(&["invalid"]).inc();
        tracing::warn!(path = %req.uri().path(), method = %req.method(), "invalid access token");
        return Err(ApiError::Forbidden);
    }

    Ok(next.run(req).await)
}
