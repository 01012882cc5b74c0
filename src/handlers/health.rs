use axum::{http::StatusCode, Extension, Json};
use serde::Serialize;

use crate::backend::{BackendError, Query, SharedBackend};
use crate::repositories::EXERCISES;
use crate::version::GIT_VERSION;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    backend: &'static str,
    git_version: &'static str,
}

/// Reports whether the hosted service answers a one-row catalog read.
/// A client error still counts as an answer; transport failures and 5xx do not.
pub async fn health_check(
    Extension(backend): Extension<SharedBackend>,
) -> (StatusCode, Json<HealthResponse>) {
    let query = Query::new(EXERCISES).select("id").limit(1);
    let reachable = match backend.select(None, &query).await {
        Ok(_) => true,
        Err(BackendError::Api { status, .. }) if status < 500 => true,
        Err(e) => {
            tracing::warn!("Backend health check failed: {}", e);
            false
        }
    };

    let (code, status, backend) = if reachable {
        (StatusCode::OK, "ok", "reachable")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unreachable")
    };

    (
        code,
        Json(HealthResponse {
            status,
            backend,
            git_version: GIT_VERSION,
        }),
    )
}
