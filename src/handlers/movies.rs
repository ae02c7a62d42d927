use axum::extract::{Extension, State};
use serde_json::{json, Value};

use super::payload::{parse_create, parse_patch, Body, ResourceId};
use crate::database::models::{MoviePatch, NewMovie};
use crate::error::OrApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /movies
pub async fn list(State(state): State<AppState>) -> ApiResult<Value> {
    let movies = state.store.list_movies().await.or_not_found()?;
    Ok(ApiResponse::success(json!({ "movies": movies })))
}

/// GET /movies/:id/actors - names of the actors cast in a movie
pub async fn actors(State(state): State<AppState>, ResourceId(id): ResourceId) -> ApiResult<Value> {
    let movie = state.store.find_movie(id).await.or_not_found()?.or_not_found()?;
    let actors = state.store.actor_names_for_movie(id).await.or_not_found()?;

    Ok(ApiResponse::success(json!({
        "movie_id": id,
        "movie": movie.title,
        "actors": actors,
    })))
}

/// POST /movies
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Body,
) -> ApiResult<Value> {
    let new_movie: NewMovie = parse_create(body, NewMovie::REQUIRED)?;
    let movie = state.store.insert_movie(new_movie).await.or_bad_request()?;

    tracing::info!(movie_id = movie.id, subject = ?user.subject, "Created movie");
    Ok(ApiResponse::success(json!({ "movie": movie })))
}

/// PATCH /movies/:id
pub async fn update(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    body: Body,
) -> ApiResult<Value> {
    let patch: MoviePatch = parse_patch(body, MoviePatch::FIELDS)?;
    let mut movie = state.store.find_movie(id).await.or_not_found()?.or_not_found()?;
    patch.apply(&mut movie);
    let movie = state.store.update_movie(&movie).await.or_not_found()?;

    Ok(ApiResponse::success(json!({ "movie": movie })))
}

/// DELETE /movies/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ResourceId(id): ResourceId,
) -> ApiResult<Value> {
    state.store.find_movie(id).await.or_not_found()?.or_not_found()?;
    state.store.delete_movie(id).await.or_not_found()?;

    tracing::info!(movie_id = id, subject = ?user.subject, "Deleted movie");
    Ok(ApiResponse::success(json!({ "deleted_id": id })))
}
