//! Order and payment-method handlers

use crate::api::ApiResponse;
use crate::domain::{CreateOrderInput, OrderWithPayment, PaymentMethod};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::state::HasCommerce;
use axum::{extract::State, Json};

pub async fn create<S: HasCommerce>(
    State(state): State<S>,
    auth: AuthUser,
    Json(input): Json<CreateOrderInput>,
) -> Result<ApiResponse<OrderWithPayment>> {
    let order = state.order_service().create(auth.user_id, input).await?;
    Ok(ApiResponse::created("Order created successfully!", order))
}

/// Admins see every order, everyone else their own
pub async fn list<S: HasCommerce>(
    State(state): State<S>,
    auth: AuthUser,
) -> Result<ApiResponse<Vec<OrderWithPayment>>> {
    let orders = if auth.is_admin() {
        state.order_service().list_all().await?
    } else {
        state.order_service().list_for_user(auth.user_id).await?
    };
    Ok(ApiResponse::ok("Orders fetched successfully!", orders))
}

pub async fn payment_methods<S: HasCommerce>(
    State(state): State<S>,
) -> Result<ApiResponse<Vec<PaymentMethod>>> {
    let methods = state.order_service().payment_methods().await?;
    Ok(ApiResponse::ok("Payment methods fetched successfully!", methods))
}
