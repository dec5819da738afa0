use crate::state::HasCommerce;

pub trait CommerceContext: HasCommerce {}

impl<T> CommerceContext for T where T: HasCommerce {}
