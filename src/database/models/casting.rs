use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Links one actor to one movie. Removed together with either side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Casting {
    pub id: i32,
    pub actor_id: i32,
    pub movie_id: i32,
    pub actor_award: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCasting {
    pub actor_id: i32,
    pub movie_id: i32,
    pub actor_award: Option<String>,
}

impl NewCasting {
    /// `actor_award` must be present in the body, though it may be null.
    pub const REQUIRED: &'static [&'static str] = &["actor_id", "movie_id", "actor_award"];
}
