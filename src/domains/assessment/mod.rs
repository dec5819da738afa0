//! Assessment: quizzes, questions and scored attempts

pub mod api;
pub mod context;
pub mod routes;
pub mod service;
