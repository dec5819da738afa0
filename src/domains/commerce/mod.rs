//! Commerce: orders with optional payments, carts and wishlists

pub mod api;
pub mod context;
pub mod routes;
pub mod service;
