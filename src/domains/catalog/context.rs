use crate::state::HasCatalog;

pub trait CatalogContext: HasCatalog {}

impl<T> CatalogContext for T where T: HasCatalog {}
