use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;

use super::AuthError;

/// Source of the signing keys tokens are verified against.
#[async_trait]
pub trait KeySource: Send + Sync {
    async fn key_set(&self) -> Result<JwkSet, AuthError>;
}

/// Fetches the identity provider's published JWKS on every call.
pub struct JwksFetcher {
    client: reqwest::Client,
    url: String,
}

impl JwksFetcher {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl KeySource for JwksFetcher {
    async fn key_set(&self) -> Result<JwkSet, AuthError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                tracing::error!("Failed to fetch JWKS from {}: {}", self.url, e);
                AuthError::KeysUnavailable
            })?;

        response.json::<JwkSet>().await.map_err(|e| {
            tracing::error!("Invalid JWKS document from {}: {}", self.url, e);
            AuthError::KeysUnavailable
        })
    }
}

/// A fixed key set, loaded once from a local JWKS document (`AUTH_JWKS_FILE`).
#[derive(Clone)]
pub struct StaticKeySet(pub JwkSet);

impl StaticKeySet {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self)
    }
}

#[async_trait]
impl KeySource for StaticKeySet {
    async fn key_set(&self) -> Result<JwkSet, AuthError> {
        Ok(self.0.clone())
    }
}
