use axum::Router;
use clap::Args;
use pulse_core::plugin::PluginManager;
use pulse_events::EventsPlugin;
use std::future::IntoFuture;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use utoipa_swagger_ui::SwaggerUi;

use crate::health::HealthPlugin;

#[derive(Args)]
pub struct ServeCommand {
    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1:8000", env = "PULSE_ADDRESS")]
    pub address: String,

    /// Database connection URL
    #[arg(long, env = "PULSE_DATABASE_URL")]
    pub database_url: String,
}

impl ServeCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(self.run())
    }

    async fn run(self) -> anyhow::Result<()> {
        debug!("Initializing database connection...");
        let db = pulse_database::establish_connection(&self.database_url).await?;

        // Initialize plugin manager and register core services
        let mut plugin_manager = PluginManager::new();
        let service_context = plugin_manager.service_context();
        service_context.register_service(db.clone());

        debug!("Registering HealthPlugin");
        plugin_manager.register_plugin(Box::new(HealthPlugin));

        debug!("Registering EventsPlugin");
        plugin_manager.register_plugin(Box::new(EventsPlugin));

        plugin_manager
            .initialize_plugins()
            .await
            .map_err(|e| anyhow::anyhow!("Plugin initialization failed: {}", e))?;
        debug!("All plugins initialized successfully");

        // Create CORS layer that allows all origins
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let app = plugin_manager
            .build_application()
            .map_err(|e| anyhow::anyhow!("Failed to build application: {}", e))?
            .merge(create_swagger_router(&plugin_manager)?)
            .layer(cors)
            .layer(TraceLayer::new_for_http());

        let listener = TcpListener::bind(&self.address).await?;
        info!("Pulse API server listening on {}", self.address);

        axum::serve(listener, app).into_future().await?;
        info!("Pulse API server exited");
        Ok(())
    }
}

fn create_openapi(plugin_manager: &PluginManager) -> anyhow::Result<utoipa::openapi::OpenApi> {
    // Get the unified OpenAPI schema from all plugins - fail if it can't be built
    plugin_manager
        .get_unified_openapi()
        .map_err(|e| anyhow::anyhow!("Failed to build unified OpenAPI schema: {}", e))
}

fn create_swagger_router(plugin_manager: &PluginManager) -> anyhow::Result<Router> {
    let api_doc = create_openapi(plugin_manager)?;
    Ok(Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api_doc)))
}
