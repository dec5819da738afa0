//! Authentication enforcement middleware for the protected router
//!
//! Rejects requests without a valid Bearer access token before any
//! handler runs.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use super::auth::{extract_bearer_token, unauthorized_response};
use crate::jwt::JwtManager;

/// Shared state for authentication middleware
#[derive(Clone)]
pub struct AuthMiddlewareState {
    jwt_manager: JwtManager,
}

impl AuthMiddlewareState {
    pub fn new(jwt_manager: JwtManager) -> Self {
        Self { jwt_manager }
    }
}

/// Authentication enforcement middleware
pub async fn require_auth_middleware(
    State(auth_state): State<AuthMiddlewareState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let token = match extract_bearer_token(request.headers()) {
        Ok(token) => token,
        Err(e) => return unauthorized_response(e.message()),
    };

    if auth_state.jwt_manager.verify_access_token(token).is_err() {
        return unauthorized_response("Invalid or expired token");
    }

    next.run(request).await
}
