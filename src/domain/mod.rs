//! Domain models for the LMS backend

pub mod catalog;
pub mod commerce;
pub mod common;
pub mod learning;
pub mod quiz;
pub mod user;

pub use catalog::*;
pub use commerce::*;
pub use common::*;
pub use learning::*;
pub use quiz::*;
pub use user::*;
