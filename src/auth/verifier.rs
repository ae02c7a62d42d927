use std::sync::Arc;

use axum::http::HeaderMap;
use jsonwebtoken::{decode, decode_header, errors::ErrorKind, DecodingKey, Validation};

use super::{bearer_token, check_permission, AuthError, Claims, KeySource};
use crate::config::AuthConfig;

/// Verifies bearer tokens against the identity provider's key set.
pub struct TokenVerifier {
    keys: Arc<dyn KeySource>,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig, keys: Arc<dyn KeySource>) -> Self {
        let mut validation = Validation::default();
        validation.algorithms = config.algorithms.clone();
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_issuer(&[config.issuer()]);
        validation.leeway = config.leeway_secs;

        Self { keys, validation }
    }

    /// Validate the request's token and require `permission` in its claims.
    pub async fn authorize(&self, headers: &HeaderMap, permission: &str) -> Result<Claims, AuthError> {
        let token = bearer_token(headers)?;
        let claims = self.verify(token).await?;
        check_permission(&claims, permission)?;
        Ok(claims)
    }

    /// Decode and verify a raw token, returning its claims.
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::Unparseable)?;
        let kid = header.kid.ok_or(AuthError::MissingKeyId)?;

        let key_set = self.keys.key_set().await?;
        let jwk = key_set.find(&kid).ok_or(AuthError::KeyNotFound)?;
        let key = DecodingKey::from_jwk(jwk).map_err(|_| AuthError::KeyNotFound)?;

        decode::<Claims>(token, &key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => AuthError::IncorrectClaims,
                ErrorKind::MissingRequiredClaim(claim) if claim == "aud" || claim == "iss" => {
                    AuthError::IncorrectClaims
                }
                other => {
                    tracing::debug!("Token rejected: {:?}", other);
                    AuthError::Unparseable
                }
            })
    }
}
