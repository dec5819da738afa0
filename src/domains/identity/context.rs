use crate::state::HasServices;

pub trait IdentityContext: HasServices {}

impl<T> IdentityContext for T where T: HasServices {}
