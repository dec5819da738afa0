use crate::domains::commerce::api as commerce_api;
use crate::domains::commerce::context::CommerceContext;
use axum::{
    routing::{delete, get},
    Router,
};

pub fn protected_routes<S>() -> Router<S>
where
    S: CommerceContext,
{
    Router::new()
        .route(
            "/orders",
            get(commerce_api::order::list::<S>).post(commerce_api::order::create::<S>),
        )
        .route(
            "/payment-methods",
            get(commerce_api::order::payment_methods::<S>),
        )
        .route(
            "/cart/courses",
            get(commerce_api::saved_course::list_cart::<S>)
                .post(commerce_api::saved_course::add_to_cart::<S>),
        )
        .route(
            "/cart/courses/{course_id}",
            delete(commerce_api::saved_course::remove_from_cart::<S>),
        )
        .route(
            "/wishlist/courses",
            get(commerce_api::saved_course::list_wishlist::<S>)
                .post(commerce_api::saved_course::add_to_wishlist::<S>),
        )
        .route(
            "/wishlist/courses/{course_id}",
            delete(commerce_api::saved_course::remove_from_wishlist::<S>),
        )
}
