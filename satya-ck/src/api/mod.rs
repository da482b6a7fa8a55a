//! HTTP API handlers for satya-ck

pub mod analyze;
pub mod auth;
pub mod error;
pub mod health;

pub use analyze::{analyze, signals};
pub use auth::{current_user, sign_in, sign_out, sign_up, BearerToken};
pub use error::{ApiError, ApiResult};
pub use health::health_routes;
