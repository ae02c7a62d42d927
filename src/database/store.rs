use async_trait::async_trait;

use super::manager::DatabaseError;
use super::models::{Actor, Casting, Movie, NewActor, NewCasting, NewMovie};

/// Persistence operations behind the HTTP handlers.
///
/// Every call is its own unit of work: writes commit before returning, and
/// reads always go back to the store. Lists come back ordered by id.
#[async_trait]
pub trait CastingStore: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;

    async fn list_actors(&self) -> Result<Vec<Actor>, DatabaseError>;
    async fn find_actor(&self, id: i32) -> Result<Option<Actor>, DatabaseError>;
    async fn insert_actor(&self, actor: NewActor) -> Result<Actor, DatabaseError>;
    /// Persist every field of `actor`, returning the stored row.
    async fn update_actor(&self, actor: &Actor) -> Result<Actor, DatabaseError>;
    /// Remove the actor along with its castings.
    async fn delete_actor(&self, id: i32) -> Result<(), DatabaseError>;
    /// Titles of the movies the actor is cast in.
    async fn movie_titles_for_actor(&self, actor_id: i32) -> Result<Vec<String>, DatabaseError>;

    async fn list_movies(&self) -> Result<Vec<Movie>, DatabaseError>;
    async fn find_movie(&self, id: i32) -> Result<Option<Movie>, DatabaseError>;
    async fn insert_movie(&self, movie: NewMovie) -> Result<Movie, DatabaseError>;
    async fn update_movie(&self, movie: &Movie) -> Result<Movie, DatabaseError>;
    async fn delete_movie(&self, id: i32) -> Result<(), DatabaseError>;
    /// Names of the actors cast in the movie.
    async fn actor_names_for_movie(&self, movie_id: i32) -> Result<Vec<String>, DatabaseError>;

    async fn list_castings(&self) -> Result<Vec<Casting>, DatabaseError>;
    /// Fails with `ForeignKey` when the actor or movie does not exist.
    async fn insert_casting(&self, casting: NewCasting) -> Result<Casting, DatabaseError>;
}
