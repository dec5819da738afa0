use crate::state::HasLearning;

pub trait LearningContext: HasLearning {}

impl<T> LearningContext for T where T: HasLearning {}
