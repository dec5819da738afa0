pub mod category;
pub mod content;
pub mod course;
pub mod module;
pub mod template;

pub use category::CategoryService;
pub use content::ContentService;
pub use course::CourseService;
pub use module::ModuleService;
pub use template::TemplateService;
