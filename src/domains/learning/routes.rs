use crate::domains::learning::api as learning_api;
use crate::domains::learning::context::LearningContext;
use axum::{
    routing::{get, post},
    Router,
};

pub fn protected_routes<S>() -> Router<S>
where
    S: LearningContext,
{
    Router::new()
        .route("/my-courses", get(learning_api::enrollment::my_courses::<S>))
        .route(
            "/create-enrollment",
            post(learning_api::enrollment::create::<S>),
        )
        .route("/enrollments", get(learning_api::enrollment::list::<S>))
        .route(
            "/users/{user_id}/courses",
            get(learning_api::enrollment::list_user_courses::<S>),
        )
        .route(
            "/certificates",
            get(learning_api::enrollment::certificates::<S>),
        )
        .route(
            "/complete-contents",
            post(learning_api::progress::complete_content::<S>),
        )
        .route(
            "/complete-module",
            post(learning_api::progress::complete_module::<S>),
        )
        .route(
            "/complete-course",
            post(learning_api::progress::complete_course::<S>),
        )
        .route(
            "/module-progresss",
            get(learning_api::progress::module_progress::<S>),
        )
        .route(
            "/course-progresss",
            get(learning_api::progress::course_progress::<S>),
        )
}
