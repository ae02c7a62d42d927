use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Actor {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub gender: String,
}

/// Body of `POST /actors`
#[derive(Debug, Clone, Deserialize)]
pub struct NewActor {
    pub name: String,
    pub age: i32,
    pub gender: String,
}

impl NewActor {
    pub const REQUIRED: &'static [&'static str] = &["name", "age", "gender"];
}

/// Body of `PATCH /actors/:id`; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActorPatch {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
}

impl ActorPatch {
    pub const FIELDS: &'static [&'static str] = &["name", "age", "gender"];

    pub fn apply(self, actor: &mut Actor) {
        if let Some(name) = self.name {
            actor.name = name;
        }
        if let Some(age) = self.age {
            actor.age = age;
        }
        if let Some(gender) = self.gender {
            actor.gender = gender;
        }
    }
}
