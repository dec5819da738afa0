//! HTTP middleware
//!
//! - JWT authentication extractor (`AuthUser`)
//! - Authentication enforcement for the protected router
//! - Error envelope normalization
//! - Request ID propagation and HTTP metrics

pub mod auth;
pub mod error_response;
pub mod metrics;
pub mod require_auth;

pub use auth::AuthUser;
pub use error_response::normalize_error_response;
pub use metrics::ObservabilityLayer;
pub use require_auth::{require_auth_middleware, AuthMiddlewareState};
