use axum::extract::{Extension, State};
use serde_json::{json, Value};

use super::payload::{parse_create, Body};
use crate::database::models::NewCasting;
use crate::database::DatabaseError;
use crate::error::{ApiError, OrApiError};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /cast - every actor/movie association
pub async fn list(State(state): State<AppState>) -> ApiResult<Value> {
    let cast = state.store.list_castings().await.or_internal()?;
    Ok(ApiResponse::success(json!({ "cast": cast })))
}

/// POST /cast - link an existing actor to an existing movie
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Body,
) -> ApiResult<Value> {
    let new_casting: NewCasting = parse_create(body, NewCasting::REQUIRED)?;
    let cast = match state.store.insert_casting(new_casting).await {
        Ok(cast) => cast,
        Err(DatabaseError::ForeignKey(detail)) => {
            tracing::info!(subject = ?user.subject, "Rejected casting for unknown actor or movie: {}", detail);
            return Err(ApiError::BadRequest);
        }
        Err(e) => {
            tracing::warn!("Failed to create casting: {}", e);
            return Err(ApiError::BadRequest);
        }
    };

    tracing::info!(
        casting_id = cast.id,
        actor_id = cast.actor_id,
        movie_id = cast.movie_id,
        subject = ?user.subject,
        "Created casting"
    );
    Ok(ApiResponse::success(json!({ "cast": cast })))
}
