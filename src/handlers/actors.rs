use axum::extract::{Extension, State};
use serde_json::{json, Value};

use super::payload::{parse_create, parse_patch, Body, ResourceId};
use crate::database::models::{ActorPatch, NewActor};
use crate::error::OrApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /actors - list every actor
pub async fn list(State(state): State<AppState>) -> ApiResult<Value> {
    let actors = state.store.list_actors().await.or_not_found()?;
    Ok(ApiResponse::success(json!({ "actors": actors })))
}

/// GET /actors/:id/movies - titles of the movies an actor is cast in
pub async fn movies(State(state): State<AppState>, ResourceId(id): ResourceId) -> ApiResult<Value> {
    let actor = state.store.find_actor(id).await.or_not_found()?.or_not_found()?;
    let movies = state.store.movie_titles_for_actor(id).await.or_not_found()?;

    Ok(ApiResponse::success(json!({
        "actor_id": id,
        "actor": actor.name,
        "movies": movies,
    })))
}

/// POST /actors - create an actor from name, age and gender
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Body,
) -> ApiResult<Value> {
    let new_actor: NewActor = parse_create(body, NewActor::REQUIRED)?;
    let actor = state.store.insert_actor(new_actor).await.or_bad_request()?;

    tracing::info!(actor_id = actor.id, subject = ?user.subject, "Created actor");
    Ok(ApiResponse::success(json!({ "actor": actor })))
}

/// PATCH /actors/:id - update the fields present in the body
pub async fn update(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    body: Body,
) -> ApiResult<Value> {
    let patch: ActorPatch = parse_patch(body, ActorPatch::FIELDS)?;
    let mut actor = state.store.find_actor(id).await.or_not_found()?.or_not_found()?;
    patch.apply(&mut actor);
    let actor = state.store.update_actor(&actor).await.or_not_found()?;

    Ok(ApiResponse::success(json!({ "actor": actor })))
}

/// DELETE /actors/:id - delete an actor and its castings
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ResourceId(id): ResourceId,
) -> ApiResult<Value> {
    state.store.find_actor(id).await.or_not_found()?.or_not_found()?;
    state.store.delete_actor(id).await.or_not_found()?;

    tracing::info!(actor_id = id, subject = ?user.subject, "Deleted actor");
    Ok(ApiResponse::success(json!({ "deleted_id": id })))
}
