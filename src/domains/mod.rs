//! Domain-oriented modules grouping API, service, and route layers by bounded context.

pub mod assessment;
pub mod catalog;
pub mod commerce;
pub mod identity;
pub mod learning;

/// Aggregate trait for building the full HTTP router from domain route modules.
pub trait DomainRouterState:
    identity::context::IdentityContext
    + catalog::context::CatalogContext
    + learning::context::LearningContext
    + assessment::context::AssessmentContext
    + commerce::context::CommerceContext
{
}

impl<T> DomainRouterState for T where
    T: identity::context::IdentityContext
        + catalog::context::CatalogContext
        + learning::context::LearningContext
        + assessment::context::AssessmentContext
        + commerce::context::CommerceContext
{
}
