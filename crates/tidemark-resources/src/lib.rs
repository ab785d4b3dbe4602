//! tidemark-resources — typed bindings for well-known resource names.
//!
//! The sub-resource engine stores generic items; these bindings give
//! the API boundary a typed view of the two shipped resource names
//! (routes, vessels). Translation is deliberately lenient: a stored
//! item with absent or mistyped numeric attributes coerces to zero
//! rather than failing, so documents written by older or foreign
//! writers still round-trip.

pub mod model;
pub mod routes;
pub mod vessels;

pub use model::ResourceModel;
pub use routes::RouteConfig;
pub use vessels::VesselConfig;
