//! Learning: enrollments, progress tracking, course completion and certificates

pub mod api;
pub mod context;
pub mod routes;
pub mod service;
