//! Registration, login and profile handlers

use crate::api::ApiResponse;
use crate::domain::{LoginInput, LoginResponse, RegisterInput, User};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::state::HasServices;
use axum::{extract::State, Json};

pub async fn register<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<RegisterInput>,
) -> Result<ApiResponse<User>> {
    let user = state.auth_service().register(input).await?;
    Ok(ApiResponse::created("User registered successfully", user))
}

pub async fn login<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<LoginInput>,
) -> Result<ApiResponse<LoginResponse>> {
    let response = state.auth_service().login(input).await?;
    Ok(ApiResponse::ok("Login successful", response))
}

pub async fn profile<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
) -> Result<ApiResponse<User>> {
    let user = state.auth_service().profile(auth.user_id).await?;
    Ok(ApiResponse::ok("User profile retrieved successfully", user))
}
