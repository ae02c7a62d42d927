use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Referenced row does not exist: {0}")]
    ForeignKey(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                DatabaseError::ForeignKey(db_err.message().to_string())
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                DatabaseError::Unavailable(err.to_string())
            }
            other => DatabaseError::Sqlx(other),
        }
    }
}

const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS "Actor" (
        id SERIAL PRIMARY KEY,
        name VARCHAR(120) NOT NULL,
        age INTEGER NOT NULL,
        gender VARCHAR(120) NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "Movie" (
        id SERIAL PRIMARY KEY,
        title VARCHAR(120) NOT NULL,
        release_date DATE NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "Casting" (
        id SERIAL PRIMARY KEY,
        actor_id INTEGER NOT NULL REFERENCES "Actor"(id) ON DELETE CASCADE,
        movie_id INTEGER NOT NULL REFERENCES "Movie"(id) ON DELETE CASCADE
    )"#,
    // Tables created before awards were recorded lack the column
    r#"ALTER TABLE "Casting" ADD COLUMN IF NOT EXISTS actor_award VARCHAR(120)"#,
];

/// Connection pool construction and schema setup
pub struct DatabaseManager;

impl DatabaseManager {
    fn options(config: &DatabaseConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
    }

    /// Open the pool, failing fast when the database is unreachable
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let pool = Self::options(config).connect(&config.url).await?;
        info!("Connected database pool (max {} connections)", config.max_connections);
        Ok(pool)
    }

    /// Create the pool without touching the database; connections open on first use
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        Ok(Self::options(config).connect_lazy(&config.url)?)
    }

    /// Create the Actor, Movie and Casting tables when absent
    pub async fn ensure_schema(pool: &PgPool) -> Result<(), DatabaseError> {
        let mut tx = pool.begin().await?;
        for statement in SCHEMA {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        info!("Database schema is up to date");
        Ok(())
    }

    /// Close the pool (e.g., on shutdown)
    pub async fn close(pool: &PgPool) {
        pool.close().await;
        info!("Closed database pool");
    }
}
