use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, patch},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{self, actors, cast, movies};
use crate::middleware::require_permission;
use crate::state::AppState;

/// Build the full HTTP application.
pub fn app(state: AppState, security: &SecurityConfig) -> Router {
    Router::new()
        .merge(actor_routes())
        .merge(movie_routes())
        .merge(cast_routes())
        // Applies to the routes above only, after they matched
        .route_layer(middleware::from_fn_with_state(state.clone(), require_permission))
        // Public
        .route("/health", get(handlers::health))
        // Known path with an unsupported verb gets the same JSON 404
        .method_not_allowed_fallback(handlers::not_found)
        .fallback(handlers::not_found)
        // Global middleware
        .layer(cors_layer(security))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn actor_routes() -> Router<AppState> {
    Router::new()
        .route("/actors", get(actors::list).post(actors::create))
        .route("/actors/:id", patch(actors::update).delete(actors::delete))
        .route("/actors/:id/movies", get(actors::movies))
}

fn movie_routes() -> Router<AppState> {
    Router::new()
        .route("/movies", get(movies::list).post(movies::create))
        .route("/movies/:id", patch(movies::update).delete(movies::delete))
        .route("/movies/:id/actors", get(movies::actors))
}

fn cast_routes() -> Router<AppState> {
    Router::new().route("/cast", get(cast::list).post(cast::create))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
