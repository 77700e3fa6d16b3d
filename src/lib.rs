pub mod api;
pub mod config;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;

// Export API types
pub use api::routes;
pub use api::{AppState, DashboardView};

// Export logic types
pub use logic::{apply_query, QueryStateStore, RouteTableBuilder, Searchable};

// Export all model types
pub use model::*;

// Export store types
pub use store::{GatewayError, History, MemoryGateway, MemoryHistory, ParcelGateway, ParcelScope};

use std::sync::Arc;
use tower_http::services::ServeDir;

/// Assemble the application router with state and optional static assets
pub fn build_app<G: ParcelGateway + 'static>(
    config: &crate::config::AppConfig,
    gateway: Arc<G>,
) -> axum::Router {
    let app = routes::create_router::<G>()
        .with_state(AppState::new(gateway, config.tables.clone()));

    match &config.server.static_dir {
        Some(dir) => {
            log::info!("serving dashboard assets from {}", dir);
            app.fallback_service(ServeDir::new(dir))
        }
        None => app,
    }
}

pub async fn run_server(config: crate::config::AppConfig) -> anyhow::Result<()> {
    use axum::serve;
    use tokio::net::TcpListener;

    let app = build_app(&config, Arc::new(MemoryGateway::seeded()));

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    log::info!("courier dashboard running on http://{}", bind_address);

    serve(listener, app).await?;

    Ok(())
}
