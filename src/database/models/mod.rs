pub mod actor;
pub mod casting;
pub mod movie;

pub use actor::{Actor, ActorPatch, NewActor};
pub use casting::{Casting, NewCasting};
pub use movie::{Movie, MoviePatch, NewMovie};
