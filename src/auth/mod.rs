//! Bearer token validation and permission checks.
//!
//! Tokens are issued by an external identity provider and verified here
//! against its published key set. Routes require a single permission string
//! such as `post:movies`, which must appear in the token's `permissions` claim.

pub mod header;
pub mod keys;
pub mod roles;
pub mod verifier;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use header::bearer_token;
pub use keys::{JwksFetcher, KeySource, StaticKeySet};
pub use verifier::TokenVerifier;

/// Decoded token payload. Issuer, audience and expiry are checked during
/// decoding; only the fields handlers care about are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

/// Authentication and authorization failures. Each variant carries the
/// status code and message returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Authorization header is expected.")]
    MissingHeader,

    #[error("Authorization header must start with Bearer.")]
    InvalidScheme,

    #[error("Token not found.")]
    MissingToken,

    #[error("Authorization header must be bearer token.")]
    MalformedHeader,

    #[error("Authorization malformed.")]
    MissingKeyId,

    #[error("Token expired.")]
    Expired,

    #[error("Incorrect claims. Please, check the audience and issuer.")]
    IncorrectClaims,

    #[error("Unable to parse authentication token.")]
    Unparseable,

    #[error("Unable to find the appropriate key.")]
    KeyNotFound,

    #[error("Unable to fetch signing keys.")]
    KeysUnavailable,

    #[error("Permissions not included in JWT.")]
    PermissionsMissing,

    #[error("Permission not found.")]
    PermissionDenied,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingHeader
            | AuthError::InvalidScheme
            | AuthError::MissingToken
            | AuthError::MalformedHeader
            | AuthError::MissingKeyId
            | AuthError::Expired
            | AuthError::IncorrectClaims => StatusCode::UNAUTHORIZED,
            AuthError::Unparseable | AuthError::KeyNotFound => StatusCode::BAD_REQUEST,
            AuthError::KeysUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::PermissionsMissing | AuthError::PermissionDenied => StatusCode::FORBIDDEN,
        }
    }
}

/// Confirm `permission` is listed in the token's permissions claim.
pub fn check_permission(claims: &Claims, permission: &str) -> Result<(), AuthError> {
    let granted = claims
        .permissions
        .as_ref()
        .ok_or(AuthError::PermissionsMissing)?;

    if granted.iter().any(|p| p == permission) {
        Ok(())
    } else {
        Err(AuthError::PermissionDenied)
    }
}
