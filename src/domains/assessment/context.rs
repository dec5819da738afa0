use crate::state::HasAssessment;

pub trait AssessmentContext: HasAssessment {}

impl<T> AssessmentContext for T where T: HasAssessment {}
