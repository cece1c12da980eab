use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use pulse_core::plugin::{
    PluginContext, PluginError, PluginRoutes, PulsePlugin, ServiceRegistrationContext,
};
use tracing::debug;

/// Event recording and aggregation plugin
pub struct EventsPlugin;

impl Default for EventsPlugin {
    fn default() -> Self {
        Self
    }
}

impl PulsePlugin for EventsPlugin {
    fn name(&self) -> &'static str {
        "events"
    }

    fn register_services<'a>(
        &'a self,
        context: &'a ServiceRegistrationContext,
    ) -> Pin<Box<dyn Future<Output = Result<(), PluginError>> + Send + 'a>> {
        Box::pin(async move {
            let db = context.require_service::<sea_orm::DatabaseConnection>();

            let events_service = Arc::new(crate::services::EventsService::new(db));
            context.register_service(events_service);

            debug!("Events services registered successfully");
            Ok(())
        })
    }

    fn configure_routes(&self, context: &PluginContext) -> Option<PluginRoutes> {
        let events_service = context.get_service::<crate::services::EventsService>()?;

        let routes =
            crate::handlers::configure_routes().with_state(Arc::new(crate::handlers::AppState {
                events_service,
            }));

        Some(PluginRoutes { router: routes })
    }

    fn openapi_schema(&self) -> Option<utoipa::openapi::OpenApi> {
        Some(<crate::handlers::EventsApiDoc as utoipa::OpenApi>::openapi())
    }
}
