use axum::{
    extract::{MatchedPath, Request, State},
    http::{HeaderMap, Method},
    middleware::Next,
    response::Response,
};

use crate::auth::Claims;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller, extracted from verified JWT claims
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub subject: Option<String>,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { subject: claims.sub }
    }
}

/// Permission a route requires: `<verb>:<first path segment>`,
/// so `PATCH /movies/:id` needs `patch:movies`.
pub fn required_permission(method: &Method, route: &str) -> Option<String> {
    let verb = match *method {
        Method::GET => "get",
        Method::POST => "post",
        Method::PATCH => "patch",
        Method::DELETE => "delete",
        _ => return None,
    };
    let resource = route.trim_start_matches('/').split('/').next().filter(|s| !s.is_empty())?;
    Some(format!("{}:{}", verb, resource))
}

/// JWT permission middleware. Runs after routing, so unmatched paths never
/// reach it; verified claims are injected into the request as `AuthUser`.
pub async fn require_permission(
    State(state): State<AppState>,
    matched: MatchedPath,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let permission = required_permission(request.method(), matched.as_str()).ok_or(ApiError::NotFound)?;

    let claims = state
        .verifier
        .authorize(&headers, &permission)
        .await
        .map_err(|err| {
            tracing::info!(
                "Rejected {} {}: {}",
                request.method(),
                matched.as_str(),
                err
            );
            err
        })?;

    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}
