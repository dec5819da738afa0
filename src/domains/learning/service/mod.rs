pub mod enrollment;
pub mod progress;

pub use enrollment::{EnrollmentRepositoryBundle, EnrollmentService};
pub use progress::ProgressService;
