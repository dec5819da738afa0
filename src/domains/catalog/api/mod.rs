pub mod category;
pub mod content;
pub mod course;
pub mod module;
pub mod template;
