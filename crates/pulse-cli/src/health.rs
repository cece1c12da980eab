//! Liveness and health endpoints

use axum::{response::Json, routing::get, Router};
use pulse_core::plugin::{
    PluginContext, PluginError, PluginRoutes, PulsePlugin, ServiceRegistrationContext,
};
use serde_json::{json, Value};
use std::future::Future;
use std::pin::Pin;

/// Liveness stub
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is alive")
    ),
    tag = "Health"
)]
pub async fn read_root() -> Json<Value> {
    Json(json!({ "Hello": "World" }))
}

/// Health check
#[utoipa::path(
    get,
    path = "/healthy",
    responses(
        (status = 200, description = "Service is healthy")
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<Value> {
    Json(json!({ "health status": "Ok" }))
}

pub fn configure_routes() -> Router {
    Router::new()
        .route("/", get(read_root))
        .route("/healthy", get(health_check))
}

#[derive(utoipa::OpenApi)]
#[openapi(
    paths(read_root, health_check),
    tags(
        (name = "Health", description = "Service liveness endpoints")
    )
)]
pub struct HealthApiDoc;

/// Health endpoints plugin (no service dependencies)
pub struct HealthPlugin;

impl PulsePlugin for HealthPlugin {
    fn name(&self) -> &'static str {
        "health"
    }

    fn register_services<'a>(
        &'a self,
        _context: &'a ServiceRegistrationContext,
    ) -> Pin<Box<dyn Future<Output = Result<(), PluginError>> + Send + 'a>> {
        Box::pin(async move { Ok(()) })
    }

    fn configure_routes(&self, _context: &PluginContext) -> Option<PluginRoutes> {
        Some(PluginRoutes {
            router: configure_routes(),
        })
    }

    fn openapi_schema(&self) -> Option<utoipa::openapi::OpenApi> {
        Some(<HealthApiDoc as utoipa::OpenApi>::openapi())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_root_body() {
        let Json(body) = read_root().await;
        assert_eq!(body, json!({ "Hello": "World" }));
    }

    #[tokio::test]
    async fn test_health_check_body() {
        let Json(body) = health_check().await;
        assert_eq!(body, json!({ "health status": "Ok" }));
    }
}
