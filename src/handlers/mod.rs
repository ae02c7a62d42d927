// Route handlers, one module per resource. Every route except /health sits
// behind the permission middleware, which has already verified the caller.
pub mod actors;
pub mod cast;
pub mod health;
pub mod movies;
pub mod payload;

pub use health::{health, not_found};
