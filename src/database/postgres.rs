use async_trait::async_trait;
use sqlx::PgPool;

use super::manager::DatabaseError;
use super::models::{Actor, Casting, Movie, NewActor, NewCasting, NewMovie};
use super::store::CastingStore;

/// PostgreSQL-backed store. Each operation checks a connection out of the
/// pool and hands it back when the connection guard drops, on success and
/// error paths alike.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn expect_deleted(rows: u64, what: &str, id: i32) -> Result<(), DatabaseError> {
    if rows == 0 {
        Err(DatabaseError::NotFound(format!("{} {}", what, id)))
    } else {
        Ok(())
    }
}

#[async_trait]
impl CastingStore for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_actors(&self) -> Result<Vec<Actor>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let actors = sqlx::query_as::<_, Actor>(r#"SELECT id, name, age, gender FROM "Actor" ORDER BY id"#)
            .fetch_all(&mut *conn)
            .await?;
        Ok(actors)
    }

    async fn find_actor(&self, id: i32) -> Result<Option<Actor>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let actor = sqlx::query_as::<_, Actor>(r#"SELECT id, name, age, gender FROM "Actor" WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(actor)
    }

    async fn insert_actor(&self, actor: NewActor) -> Result<Actor, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let created = sqlx::query_as::<_, Actor>(
            r#"INSERT INTO "Actor" (name, age, gender) VALUES ($1, $2, $3)
               RETURNING id, name, age, gender"#,
        )
        .bind(actor.name)
        .bind(actor.age)
        .bind(actor.gender)
        .fetch_one(&mut *conn)
        .await?;
        Ok(created)
    }

    async fn update_actor(&self, actor: &Actor) -> Result<Actor, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query_as::<_, Actor>(
            r#"UPDATE "Actor" SET name = $2, age = $3, gender = $4 WHERE id = $1
               RETURNING id, name, age, gender"#,
        )
        .bind(actor.id)
        .bind(&actor.name)
        .bind(actor.age)
        .bind(&actor.gender)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("actor {}", actor.id)))
    }

    async fn delete_actor(&self, id: i32) -> Result<(), DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query(r#"DELETE FROM "Actor" WHERE id = $1"#)
            .bind(id)
            .execute(&mut *conn)
            .await?;
        expect_deleted(result.rows_affected(), "actor", id)
    }

    async fn movie_titles_for_actor(&self, actor_id: i32) -> Result<Vec<String>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let titles = sqlx::query_scalar::<_, String>(
            r#"SELECT title FROM "Movie"
               WHERE id IN (SELECT movie_id FROM "Casting" WHERE actor_id = $1)
               ORDER BY id"#,
        )
        .bind(actor_id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(titles)
    }

    async fn list_movies(&self) -> Result<Vec<Movie>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let movies = sqlx::query_as::<_, Movie>(r#"SELECT id, title, release_date FROM "Movie" ORDER BY id"#)
            .fetch_all(&mut *conn)
            .await?;
        Ok(movies)
    }

    async fn find_movie(&self, id: i32) -> Result<Option<Movie>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let movie = sqlx::query_as::<_, Movie>(r#"SELECT id, title, release_date FROM "Movie" WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(movie)
    }

    async fn insert_movie(&self, movie: NewMovie) -> Result<Movie, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let created = sqlx::query_as::<_, Movie>(
            r#"INSERT INTO "Movie" (title, release_date) VALUES ($1, $2)
               RETURNING id, title, release_date"#,
        )
        .bind(movie.title)
        .bind(movie.release_date)
        .fetch_one(&mut *conn)
        .await?;
        Ok(created)
    }

    async fn update_movie(&self, movie: &Movie) -> Result<Movie, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query_as::<_, Movie>(
            r#"UPDATE "Movie" SET title = $2, release_date = $3 WHERE id = $1
               RETURNING id, title, release_date"#,
        )
        .bind(movie.id)
        .bind(&movie.title)
        .bind(movie.release_date)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("movie {}", movie.id)))
    }

    async fn delete_movie(&self, id: i32) -> Result<(), DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query(r#"DELETE FROM "Movie" WHERE id = $1"#)
            .bind(id)
            .execute(&mut *conn)
            .await?;
        expect_deleted(result.rows_affected(), "movie", id)
    }

    async fn actor_names_for_movie(&self, movie_id: i32) -> Result<Vec<String>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let names = sqlx::query_scalar::<_, String>(
            r#"SELECT name FROM "Actor"
               WHERE id IN (SELECT actor_id FROM "Casting" WHERE movie_id = $1)
               ORDER BY id"#,
        )
        .bind(movie_id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(names)
    }

    async fn list_castings(&self) -> Result<Vec<Casting>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let castings = sqlx::query_as::<_, Casting>(
            r#"SELECT id, actor_id, movie_id, actor_award FROM "Casting" ORDER BY id"#,
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(castings)
    }

    async fn insert_casting(&self, casting: NewCasting) -> Result<Casting, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        // Unknown actor or movie surfaces as DatabaseError::ForeignKey
        let created = sqlx::query_as::<_, Casting>(
            r#"INSERT INTO "Casting" (actor_id, movie_id, actor_award) VALUES ($1, $2, $3)
               RETURNING id, actor_id, movie_id, actor_award"#,
        )
        .bind(casting.actor_id)
        .bind(casting.movie_id)
        .bind(casting.actor_award)
        .fetch_one(&mut *conn)
        .await?;
        Ok(created)
    }
}
