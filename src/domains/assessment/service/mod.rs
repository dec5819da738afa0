pub mod attempt;
pub mod quiz;
pub mod scoring;

pub use attempt::AttemptService;
pub use quiz::QuizService;
