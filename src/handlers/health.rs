use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::state::AppState;

/// GET /health - public liveness check, reports database reachability
pub async fn health(State(state): State<AppState>) -> Response {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => ApiResponse::success(json!({
            "status": "ok",
            "timestamp": now,
            "database": "ok",
        }))
        .into_response(),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            let database = match e {
                DatabaseError::Unavailable(_) => "unavailable",
                _ => "error",
            };
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "status": "degraded",
                    "timestamp": now,
                    "database": database,
                })),
            )
                .into_response()
        }
    }
}

/// Fallback for unmatched routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
