//! tidemark-api — REST API for Tidemark.
//!
//! Provides axum route handlers for tenant lifecycle and per-resource
//! configuration items.
//!
//! # API Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/api/v1/tenants` | List all tenants |
//! | POST | `/api/v1/tenants` | Register a tenant |
//! | GET | `/api/v1/tenants/{id}` | Get tenant details |
//! | PUT | `/api/v1/tenants/{id}` | Update a tenant |
//! | DELETE | `/api/v1/tenants/{id}` | Delete a tenant |
//! | GET | `/api/v1/tenants/{id}/configurations/{name}` | List items |
//! | POST | `/api/v1/tenants/{id}/configurations/{name}` | Create an item |
//! | GET | `/api/v1/tenants/{id}/configurations/{name}/{item}` | Get an item |
//! | PATCH | `/api/v1/tenants/{id}/configurations/{name}/{item}` | Update an item |
//! | DELETE | `/api/v1/tenants/{id}/configurations/{name}/{item}` | Delete an item |
//!
//! Configuration endpoints are mounted once per typed binding
//! (`routes`, `vessels`); the handlers themselves are generic over
//! [`ResourceModel`].

pub mod handlers;

use axum::Router;
use axum::routing::get;

use tidemark_registry::ResourceRegistry;
use tidemark_resources::{ResourceModel, RouteConfig, VesselConfig};
use tidemark_tenant::TenantDirectory;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub registry: ResourceRegistry,
    pub tenants: TenantDirectory,
}

/// Build the complete API router.
pub fn build_router(registry: ResourceRegistry, tenants: TenantDirectory) -> Router {
    let state = ApiState { registry, tenants };

    let api_routes = Router::new()
        .route(
            "/tenants",
            get(handlers::list_tenants).post(handlers::create_tenant),
        )
        .route(
            "/tenants/{tenant_id}",
            get(handlers::get_tenant)
                .put(handlers::update_tenant)
                .delete(handlers::delete_tenant),
        )
        .merge(configuration_routes::<RouteConfig>())
        .merge(configuration_routes::<VesselConfig>())
        .with_state(state);

    Router::new().nest("/api/v1", api_routes)
}

/// Configuration item routes for one typed binding.
fn configuration_routes<M: ResourceModel>() -> Router<ApiState> {
    let base = format!("/tenants/{{tenant_id}}/configurations/{}", M::RESOURCE);
    Router::new()
        .route(
            &base,
            get(handlers::list_configurations::<M>).post(handlers::create_configuration::<M>),
        )
        .route(
            &format!("{base}/{{item_id}}"),
            get(handlers::get_configuration::<M>)
                .patch(handlers::update_configuration::<M>)
                .delete(handlers::delete_configuration::<M>),
        )
}
