//! Test support: an in-memory store, a static signing key and request helpers
//! for driving the router without a database or identity provider.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::auth::{roles, StaticKeySet, TokenVerifier};
use crate::config::{AuthConfig, SecurityConfig};
use crate::database::models::{Actor, Casting, Movie, NewActor, NewCasting, NewMovie};
use crate::database::{CastingStore, DatabaseError};
use crate::state::AppState;

pub const TEST_KEY_PEM: &str = include_str!("fixtures/test_key.pem");
pub const TEST_JWKS: &str = include_str!("fixtures/test_jwks.json");
pub const TEST_KEY_ID: &str = "casting-test-key";
pub const TEST_DOMAIN: &str = "casting.test.local";
pub const TEST_AUDIENCE: &str = "casting-agency";
pub const TEST_SUBJECT: &str = "auth0|casting-tests";

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Tables {
    actors: BTreeMap<i32, Actor>,
    movies: BTreeMap<i32, Movie>,
    castings: BTreeMap<i32, Casting>,
    actor_seq: i32,
    movie_seq: i32,
    casting_seq: i32,
}

/// `CastingStore` over ordered maps, with the same cascade and foreign key
/// behavior as the PostgreSQL schema.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the database were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, DatabaseError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DatabaseError::Unavailable("connection refused".to_string()));
        }
        self.tables
            .lock()
            .map_err(|_| DatabaseError::Unavailable("store lock poisoned".to_string()))
    }

    pub fn seed_actor(&self, name: &str, age: i32, gender: &str) -> Actor {
        let mut t = self.tables.lock().unwrap();
        t.actor_seq += 1;
        let actor = Actor {
            id: t.actor_seq,
            name: name.to_string(),
            age,
            gender: gender.to_string(),
        };
        t.actors.insert(actor.id, actor.clone());
        actor
    }

    pub fn seed_movie(&self, title: &str, release_date: &str) -> Movie {
        let mut t = self.tables.lock().unwrap();
        t.movie_seq += 1;
        let movie = Movie {
            id: t.movie_seq,
            title: title.to_string(),
            release_date: NaiveDate::parse_from_str(release_date, "%Y-%m-%d").unwrap(),
        };
        t.movies.insert(movie.id, movie.clone());
        movie
    }

    pub fn seed_casting(&self, actor_id: i32, movie_id: i32) -> Casting {
        let mut t = self.tables.lock().unwrap();
        t.casting_seq += 1;
        let casting = Casting {
            id: t.casting_seq,
            actor_id,
            movie_id,
            actor_award: None,
        };
        t.castings.insert(casting.id, casting.clone());
        casting
    }

    pub fn actor(&self, id: i32) -> Option<Actor> {
        self.tables.lock().unwrap().actors.get(&id).cloned()
    }

    pub fn movie(&self, id: i32) -> Option<Movie> {
        self.tables.lock().unwrap().movies.get(&id).cloned()
    }

    pub fn casting_count(&self) -> usize {
        self.tables.lock().unwrap().castings.len()
    }
}

#[async_trait]
impl CastingStore for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        self.tables().map(|_| ())
    }

    async fn list_actors(&self) -> Result<Vec<Actor>, DatabaseError> {
        Ok(self.tables()?.actors.values().cloned().collect())
    }

    async fn find_actor(&self, id: i32) -> Result<Option<Actor>, DatabaseError> {
        Ok(self.tables()?.actors.get(&id).cloned())
    }

    async fn insert_actor(&self, actor: NewActor) -> Result<Actor, DatabaseError> {
        let mut t = self.tables()?;
        t.actor_seq += 1;
        let created = Actor {
            id: t.actor_seq,
            name: actor.name,
            age: actor.age,
            gender: actor.gender,
        };
        t.actors.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_actor(&self, actor: &Actor) -> Result<Actor, DatabaseError> {
        let mut t = self.tables()?;
        let stored = t
            .actors
            .get_mut(&actor.id)
            .ok_or_else(|| DatabaseError::NotFound(format!("actor {}", actor.id)))?;
        *stored = actor.clone();
        Ok(actor.clone())
    }

    async fn delete_actor(&self, id: i32) -> Result<(), DatabaseError> {
        let mut t = self.tables()?;
        t.actors
            .remove(&id)
            .ok_or_else(|| DatabaseError::NotFound(format!("actor {}", id)))?;
        t.castings.retain(|_, c| c.actor_id != id);
        Ok(())
    }

    async fn movie_titles_for_actor(&self, actor_id: i32) -> Result<Vec<String>, DatabaseError> {
        let t = self.tables()?;
        Ok(t.movies
            .values()
            .filter(|m| t.castings.values().any(|c| c.actor_id == actor_id && c.movie_id == m.id))
            .map(|m| m.title.clone())
            .collect())
    }

    async fn list_movies(&self) -> Result<Vec<Movie>, DatabaseError> {
        Ok(self.tables()?.movies.values().cloned().collect())
    }

    async fn find_movie(&self, id: i32) -> Result<Option<Movie>, DatabaseError> {
        Ok(self.tables()?.movies.get(&id).cloned())
    }

    async fn insert_movie(&self, movie: NewMovie) -> Result<Movie, DatabaseError> {
        let mut t = self.tables()?;
        t.movie_seq += 1;
        let created = Movie {
            id: t.movie_seq,
            title: movie.title,
            release_date: movie.release_date,
        };
        t.movies.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_movie(&self, movie: &Movie) -> Result<Movie, DatabaseError> {
        let mut t = self.tables()?;
        let stored = t
            .movies
            .get_mut(&movie.id)
            .ok_or_else(|| DatabaseError::NotFound(format!("movie {}", movie.id)))?;
        *stored = movie.clone();
        Ok(movie.clone())
    }

    async fn delete_movie(&self, id: i32) -> Result<(), DatabaseError> {
        let mut t = self.tables()?;
        t.movies
            .remove(&id)
            .ok_or_else(|| DatabaseError::NotFound(format!("movie {}", id)))?;
        t.castings.retain(|_, c| c.movie_id != id);
        Ok(())
    }

    async fn actor_names_for_movie(&self, movie_id: i32) -> Result<Vec<String>, DatabaseError> {
        let t = self.tables()?;
        Ok(t.actors
            .values()
            .filter(|a| t.castings.values().any(|c| c.movie_id == movie_id && c.actor_id == a.id))
            .map(|a| a.name.clone())
            .collect())
    }

    async fn list_castings(&self) -> Result<Vec<Casting>, DatabaseError> {
        Ok(self.tables()?.castings.values().cloned().collect())
    }

    async fn insert_casting(&self, casting: NewCasting) -> Result<Casting, DatabaseError> {
        let mut t = self.tables()?;
        if !t.actors.contains_key(&casting.actor_id) {
            return Err(DatabaseError::ForeignKey(format!("actor {}", casting.actor_id)));
        }
        if !t.movies.contains_key(&casting.movie_id) {
            return Err(DatabaseError::ForeignKey(format!("movie {}", casting.movie_id)));
        }
        t.casting_seq += 1;
        let created = Casting {
            id: t.casting_seq,
            actor_id: casting.actor_id,
            movie_id: casting.movie_id,
            actor_award: casting.actor_award,
        };
        t.castings.insert(created.id, created.clone());
        Ok(created)
    }
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        domain: TEST_DOMAIN.to_string(),
        audience: TEST_AUDIENCE.to_string(),
        algorithms: vec![Algorithm::RS256],
        jwks_url: None,
        jwks_file: None,
        leeway_secs: 0,
    }
}

pub fn token_verifier() -> TokenVerifier {
    let keys = StaticKeySet::from_json(TEST_JWKS).expect("test JWKS fixture parses");
    TokenVerifier::new(&auth_config(), Arc::new(keys))
}

/// Signs tokens with the fixture key; defaults to a valid, unexpired token
/// with an empty permission list.
pub struct TokenBuilder {
    kid: Option<String>,
    claims: Value,
}

impl TokenBuilder {
    pub fn new() -> Self {
        let now = Utc::now().timestamp();
        Self {
            kid: Some(TEST_KEY_ID.to_string()),
            claims: json!({
                "iss": format!("https://{}/", TEST_DOMAIN),
                "aud": TEST_AUDIENCE,
                "sub": TEST_SUBJECT,
                "iat": now,
                "exp": now + 3600,
                "permissions": [],
            }),
        }
    }

    pub fn permissions(mut self, permissions: &[&str]) -> Self {
        self.claims["permissions"] = json!(permissions);
        self.claims["scope"] = json!(permissions.join(" "));
        self
    }

    pub fn without_permissions(mut self) -> Self {
        if let Some(claims) = self.claims.as_object_mut() {
            claims.remove("permissions");
        }
        self
    }

    pub fn expires_in(mut self, secs: i64) -> Self {
        self.claims["exp"] = json!(Utc::now().timestamp() + secs);
        self
    }

    pub fn audience(mut self, audience: &str) -> Self {
        self.claims["aud"] = json!(audience);
        self
    }

    pub fn issuer(mut self, issuer: &str) -> Self {
        self.claims["iss"] = json!(issuer);
        self
    }

    pub fn key_id(mut self, kid: Option<&str>) -> Self {
        self.kid = kid.map(str::to_string);
        self
    }

    pub fn sign(&self) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.kid.clone();
        let key = EncodingKey::from_rsa_pem(TEST_KEY_PEM.as_bytes()).expect("test key fixture parses");
        encode(&header, &self.claims, &key).expect("token signs")
    }

    /// `Authorization` header value carrying the signed token
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.sign())
    }
}

impl Default for TokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn assistant() -> String {
    TokenBuilder::new().permissions(roles::ASSISTANT).bearer()
}

pub fn director() -> String {
    TokenBuilder::new().permissions(roles::DIRECTOR).bearer()
}

pub fn producer() -> String {
    TokenBuilder::new().permissions(roles::PRODUCER).bearer()
}

// ---------------------------------------------------------------------------
// Router harness
// ---------------------------------------------------------------------------

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), Arc::new(token_verifier()));
        let router = crate::app(state, &SecurityConfig { cors_origins: Vec::new() });
        Self { store, router }
    }

    /// Send a request; `auth` is the raw `Authorization` header value.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        auth: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, auth: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(auth), None).await
    }

    pub async fn post(&self, uri: &str, auth: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(auth), Some(body)).await
    }

    pub async fn patch(&self, uri: &str, auth: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(auth), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, auth: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(auth), None).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Assert the uniform error body
pub fn assert_error(status: StatusCode, body: &Value, expected: StatusCode, message: &str) {
    assert_eq!(status, expected, "unexpected status, body: {}", body);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!(expected.as_u16()));
    assert_eq!(body["message"], json!(message));
}
