pub mod order;
pub mod saved_course;
