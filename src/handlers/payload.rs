use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ApiError, OrApiError};

/// Request body as handed to handlers; `None` when it is absent or not JSON.
pub type Body = Option<Json<Value>>;

/// Integer `:id` path segment. Anything else is reported as a missing resource.
#[derive(Debug, Clone, Copy)]
pub struct ResourceId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .or_not_found()?;
        raw.parse().map(ResourceId).or_not_found()
    }
}

fn object(body: Body) -> Result<Map<String, Value>, &'static str> {
    match body {
        Some(Json(Value::Object(map))) => Ok(map),
        Some(_) => Err("request body is not a JSON object"),
        None => Err("request body is missing or not JSON"),
    }
}

/// Decode a create body. Every key in `required` must be present; any
/// problem with the body is a bad request.
pub fn parse_create<T: DeserializeOwned>(body: Body, required: &[&str]) -> Result<T, ApiError> {
    let map = object(body).or_bad_request()?;
    if let Some(missing) = required.iter().find(|field| !map.contains_key(**field)) {
        tracing::warn!("Request body is missing required field '{}'", missing);
        return Err(ApiError::BadRequest);
    }
    serde_json::from_value(Value::Object(map)).or_bad_request()
}

/// Decode a partial update body. Known fields may be omitted but not nulled;
/// update failures surface as not found.
pub fn parse_patch<T: DeserializeOwned>(body: Body, fields: &[&str]) -> Result<T, ApiError> {
    let map = object(body).or_not_found()?;
    if let Some(nulled) = fields.iter().find(|field| map.get(**field).is_some_and(Value::is_null)) {
        tracing::warn!("Request body sets '{}' to null", nulled);
        return Err(ApiError::NotFound);
    }
    serde_json::from_value(Value::Object(map)).or_not_found()
}
