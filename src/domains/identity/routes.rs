use crate::domains::identity::api as identity_api;
use crate::domains::identity::context::IdentityContext;
use axum::{
    routing::{get, post},
    Router,
};

pub fn public_routes<S>() -> Router<S>
where
    S: IdentityContext,
{
    Router::new()
        .route("/register", post(identity_api::auth::register::<S>))
        .route("/login", post(identity_api::auth::login::<S>))
}

pub fn protected_routes<S>() -> Router<S>
where
    S: IdentityContext,
{
    Router::new().route("/profile", get(identity_api::auth::profile::<S>))
}
