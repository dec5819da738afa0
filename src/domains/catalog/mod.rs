//! Catalog: categories, courses, modules, contents, certificate templates

pub mod api;
pub mod context;
pub mod routes;
pub mod service;
