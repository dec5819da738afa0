//! Identity: registration, login, profile

pub mod api;
pub mod context;
pub mod routes;
pub mod service;
