//! REST API handlers.
//!
//! Each handler reads/writes via the registry or tenant directory and
//! returns JSON responses in a uniform envelope.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use tidemark_document::Item;
use tidemark_registry::RegistryError;
use tidemark_resources::ResourceModel;
use tidemark_tenant::TenantError;

use crate::ApiState;

/// Response wrapper for consistent API format.
#[derive(serde::Serialize)]
struct ApiResponse<T: serde::Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: serde::Serialize> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }
}

fn error_response(msg: &str, status: StatusCode) -> impl IntoResponse {
    (
        status,
        Json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(msg.to_string()),
        }),
    )
}

fn registry_error_response(e: &RegistryError) -> Response {
    let status = match e {
        RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
        RegistryError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
        RegistryError::DuplicateId(_) => StatusCode::CONFLICT,
        RegistryError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(&e.to_string(), status).into_response()
}

fn tenant_error_response(e: &TenantError) -> Response {
    let status = match e {
        TenantError::NotFound(_) => StatusCode::NOT_FOUND,
        TenantError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(&e.to_string(), status).into_response()
}

// ── Tenants ────────────────────────────────────────────────────

/// Tenant create/update request body.
#[derive(serde::Deserialize)]
pub struct TenantPayload {
    pub name: String,
    pub region: String,
    #[serde(default)]
    pub major_version: u16,
    #[serde(default)]
    pub minor_version: u16,
}

/// GET /api/v1/tenants
pub async fn list_tenants(State(state): State<ApiState>) -> impl IntoResponse {
    match state.tenants.list() {
        Ok(tenants) => ApiResponse::ok(tenants).into_response(),
        Err(e) => tenant_error_response(&e).into_response(),
    }
}

/// POST /api/v1/tenants
pub async fn create_tenant(
    State(state): State<ApiState>,
    Json(body): Json<TenantPayload>,
) -> impl IntoResponse {
    match state.tenants.create(
        &body.name,
        &body.region,
        body.major_version,
        body.minor_version,
    ) {
        Ok(record) => (StatusCode::CREATED, ApiResponse::ok(record)).into_response(),
        Err(e) => tenant_error_response(&e).into_response(),
    }
}

/// GET /api/v1/tenants/:tenant_id
pub async fn get_tenant(
    State(state): State<ApiState>,
    Path(tenant_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.tenants.get(tenant_id) {
        Ok(record) => ApiResponse::ok(record).into_response(),
        Err(e) => tenant_error_response(&e).into_response(),
    }
}

/// PUT /api/v1/tenants/:tenant_id
pub async fn update_tenant(
    State(state): State<ApiState>,
    Path(tenant_id): Path<Uuid>,
    Json(body): Json<TenantPayload>,
) -> impl IntoResponse {
    match state.tenants.update(
        tenant_id,
        &body.name,
        &body.region,
        body.major_version,
        body.minor_version,
    ) {
        Ok(record) => ApiResponse::ok(record).into_response(),
        Err(e) => tenant_error_response(&e).into_response(),
    }
}

/// DELETE /api/v1/tenants/:tenant_id
pub async fn delete_tenant(
    State(state): State<ApiState>,
    Path(tenant_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.tenants.delete(tenant_id) {
        Ok(()) => ApiResponse::ok("deleted").into_response(),
        Err(e) => tenant_error_response(&e).into_response(),
    }
}

// ── Configurations ─────────────────────────────────────────────

/// GET /api/v1/tenants/:tenant_id/configurations/:name
pub async fn list_configurations<M: ResourceModel>(
    State(state): State<ApiState>,
    Path(tenant_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.registry.get_all(tenant_id, M::RESOURCE) {
        Ok(items) => {
            let models: Vec<M> = items
                .into_iter()
                .filter_map(|object| Item::from_object(object).ok())
                .map(|item| M::from_item(&item))
                .collect();
            ApiResponse::ok(models).into_response()
        }
        Err(e) => registry_error_response(&e).into_response(),
    }
}

/// POST /api/v1/tenants/:tenant_id/configurations/:name
pub async fn create_configuration<M: ResourceModel>(
    State(state): State<ApiState>,
    Path(tenant_id): Path<Uuid>,
    Json(model): Json<M>,
) -> impl IntoResponse {
    match state.registry.create(tenant_id, M::RESOURCE, model.into_item()) {
        Ok(stored) => {
            (StatusCode::CREATED, ApiResponse::ok(M::from_item(&stored))).into_response()
        }
        Err(e) => registry_error_response(&e).into_response(),
    }
}

/// GET /api/v1/tenants/:tenant_id/configurations/:name/:item_id
pub async fn get_configuration<M: ResourceModel>(
    State(state): State<ApiState>,
    Path((tenant_id, item_id)): Path<(Uuid, String)>,
) -> impl IntoResponse {
    match state.registry.get_by_id(tenant_id, M::RESOURCE, &item_id) {
        Ok(item) => ApiResponse::ok(M::from_item(&item)).into_response(),
        Err(e) => registry_error_response(&e).into_response(),
    }
}

/// PATCH /api/v1/tenants/:tenant_id/configurations/:name/:item_id
pub async fn update_configuration<M: ResourceModel>(
    State(state): State<ApiState>,
    Path((tenant_id, item_id)): Path<(Uuid, String)>,
    Json(model): Json<M>,
) -> impl IntoResponse {
    match state
        .registry
        .update(tenant_id, M::RESOURCE, &item_id, model.into_item())
    {
        Ok(stored) => ApiResponse::ok(M::from_item(&stored)).into_response(),
        Err(e) => registry_error_response(&e).into_response(),
    }
}

/// DELETE /api/v1/tenants/:tenant_id/configurations/:name/:item_id
pub async fn delete_configuration<M: ResourceModel>(
    State(state): State<ApiState>,
    Path((tenant_id, item_id)): Path<(Uuid, String)>,
) -> impl IntoResponse {
    match state.registry.delete(tenant_id, M::RESOURCE, &item_id) {
        Ok(()) => ApiResponse::ok("deleted").into_response(),
        Err(e) => registry_error_response(&e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use tidemark_registry::ResourceRegistry;
    use tidemark_resources::RouteConfig;
    use tidemark_store::ConfigStore;
    use tidemark_tenant::{BroadcastSink, TenantDirectory};

    fn test_state() -> ApiState {
        let store = ConfigStore::open_in_memory().unwrap();
        ApiState {
            registry: ResourceRegistry::new(store.clone()),
            tenants: TenantDirectory::new(store, Arc::new(BroadcastSink::new(8))),
        }
    }

    fn test_route(id: &str) -> RouteConfig {
        RouteConfig {
            id: id.to_string(),
            name: "Ellinia to Orbis".to_string(),
            start_map_id: 101000300,
            staging_map_id: 101000301,
            en_route_map_ids: vec![200090010],
            destination_map_id: 200000100,
            observation_map_id: 200000110,
            boarding_window_duration: 240,
            pre_departure_duration: 60,
            travel_duration: 600,
            cycle_interval: 900,
        }
    }

    // ── Tenants ────────────────────────────────────────────────

    #[tokio::test]
    async fn list_tenants_empty() {
        let state = test_state();
        let resp = list_tenants(State(state)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn create_and_get_tenant() {
        let state = test_state();
        let body = TenantPayload {
            name: "alpha".to_string(),
            region: "GMS".to_string(),
            major_version: 83,
            minor_version: 1,
        };

        let resp = create_tenant(State(state.clone()), Json(body))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let tenants = state.tenants.list().unwrap();
        let resp = get_tenant(State(state.clone()), Path(tenants[0].id))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn get_nonexistent_tenant() {
        let state = test_state();
        let resp = get_tenant(State(state), Path(Uuid::new_v4()))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_nonexistent_tenant() {
        let state = test_state();
        let resp = delete_tenant(State(state), Path(Uuid::new_v4()))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    // ── Configurations ─────────────────────────────────────────

    #[tokio::test]
    async fn create_and_get_configuration() {
        let state = test_state();
        let tenant_id = Uuid::new_v4();

        let resp = create_configuration::<RouteConfig>(
            State(state.clone()),
            Path(tenant_id),
            Json(test_route("r1")),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = get_configuration::<RouteConfig>(
            State(state),
            Path((tenant_id, "r1".to_string())),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn duplicate_create_conflicts() {
        let state = test_state();
        let tenant_id = Uuid::new_v4();

        create_configuration::<RouteConfig>(
            State(state.clone()),
            Path(tenant_id),
            Json(test_route("r1")),
        )
        .await;

        let resp = create_configuration::<RouteConfig>(
            State(state),
            Path(tenant_id),
            Json(test_route("r1")),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn list_configurations_empty_for_fresh_tenant() {
        let state = test_state();
        let resp = list_configurations::<RouteConfig>(State(state), Path(Uuid::new_v4()))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn update_nonexistent_configuration() {
        let state = test_state();
        let resp = update_configuration::<RouteConfig>(
            State(state),
            Path((Uuid::new_v4(), "r1".to_string())),
            Json(test_route("r1")),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_configuration_collapses_singleton() {
        let state = test_state();
        let tenant_id = Uuid::new_v4();

        create_configuration::<RouteConfig>(
            State(state.clone()),
            Path(tenant_id),
            Json(test_route("r1")),
        )
        .await;

        let resp = delete_configuration::<RouteConfig>(
            State(state.clone()),
            Path((tenant_id, "r1".to_string())),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = get_configuration::<RouteConfig>(
            State(state),
            Path((tenant_id, "r1".to_string())),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
