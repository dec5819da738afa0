use crate::domains::assessment::api as assessment_api;
use crate::domains::assessment::context::AssessmentContext;
use axum::{
    routing::{get, post},
    Router,
};

pub fn protected_routes<S>() -> Router<S>
where
    S: AssessmentContext,
{
    Router::new()
        .route(
            "/quizzes",
            get(assessment_api::quiz::list::<S>).post(assessment_api::quiz::create::<S>),
        )
        .route(
            "/quizzes/{id}",
            get(assessment_api::quiz::get::<S>)
                .put(assessment_api::quiz::update::<S>)
                .delete(assessment_api::quiz::delete::<S>),
        )
        .route(
            "/quizzes/{id}/questions",
            post(assessment_api::quiz::add_questions::<S>)
                .put(assessment_api::quiz::update_questions::<S>),
        )
        .route(
            "/quizzes/{id}/attempts",
            get(assessment_api::attempt::list::<S>),
        )
        .route("/submit", post(assessment_api::attempt::submit::<S>))
}
