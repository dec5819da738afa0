//! LMS Core - learning management backend
//!
//! REST API for the course catalog, enrollments, progress tracking,
//! quizzes, carts, wishlists and orders.

pub mod api;
pub mod config;
pub mod domain;
pub mod domains;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod migration;
pub mod repository;
pub mod server;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
