pub mod auth;
pub mod response;

pub use auth::{require_permission, required_permission, AuthUser};
pub use response::{ApiResponse, ApiResult};
