//! Category API handlers

use crate::api::ApiResponse;
use crate::domain::Category;
use crate::error::Result;
use crate::state::HasCatalog;
use axum::extract::State;

pub async fn list<S: HasCatalog>(State(state): State<S>) -> Result<ApiResponse<Vec<Category>>> {
    let categories = state.category_service().list().await?;
    Ok(ApiResponse::ok("Categories fetch successfully!", categories))
}
