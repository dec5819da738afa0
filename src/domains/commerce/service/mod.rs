pub mod order;
pub mod saved_course;

pub use order::OrderService;
pub use saved_course::SavedCourseService;
