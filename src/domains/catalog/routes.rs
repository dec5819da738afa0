use crate::domains::catalog::api as catalog_api;
use crate::domains::catalog::context::CatalogContext;
use axum::{routing::get, Router};

pub fn protected_routes<S>() -> Router<S>
where
    S: CatalogContext,
{
    Router::new()
        .route("/categories", get(catalog_api::category::list::<S>))
        .route(
            "/templates",
            get(catalog_api::template::list::<S>).post(catalog_api::template::create::<S>),
        )
        .route(
            "/templates/{id}",
            get(catalog_api::template::get::<S>)
                .put(catalog_api::template::update::<S>)
                .delete(catalog_api::template::delete::<S>),
        )
        .route(
            "/courses",
            get(catalog_api::course::list::<S>).post(catalog_api::course::create::<S>),
        )
        .route(
            "/courses/{id}",
            get(catalog_api::course::get::<S>)
                .put(catalog_api::course::update::<S>)
                .delete(catalog_api::course::delete::<S>),
        )
        .route(
            "/modules",
            get(catalog_api::module::list::<S>).post(catalog_api::module::create::<S>),
        )
        .route(
            "/modules/{id}",
            get(catalog_api::module::get::<S>)
                .put(catalog_api::module::update::<S>)
                .delete(catalog_api::module::delete::<S>),
        )
        .route(
            "/course-module/{course_id}",
            get(catalog_api::module::list_by_course::<S>),
        )
        .route(
            "/contents",
            get(catalog_api::content::list::<S>).post(catalog_api::content::create::<S>),
        )
        .route(
            "/contents/{id}",
            get(catalog_api::content::get::<S>)
                .put(catalog_api::content::update::<S>)
                .delete(catalog_api::content::delete::<S>),
        )
        .route(
            "/module-contents/{module_id}",
            get(catalog_api::content::list_by_module::<S>),
        )
}
