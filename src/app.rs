use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::report::SheetStyle;
use crate::services::InventoryService;

/// Running application with its server task
pub struct Application {
    pub server_handle: JoinHandle<Result<(), std::io::Error>>,
}

impl Application {
    /// Build the inventory service and spawn the HTTP API server (Axum)
    pub async fn build(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Initializing application components");

        let inventory_service = InventoryService::new(SheetStyle::default());

        let app_state = AppState {
            inventory_service,
            max_upload_bytes: config.max_upload_bytes,
        };
        let app = create_router(app_state).layer(TraceLayer::new_for_http());

        let addr = config.server_addr();
        info!("Starting HTTP server on {}", addr);
        info!("Upload limit: {} bytes", config.max_upload_bytes);

        let server_handle = tokio::spawn(async move {
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, app).await
        });

        info!("Application initialized successfully");

        Ok(Self { server_handle })
    }

    /// Run until the server stops
    pub async fn run_until_stopped(self) -> Result<(), Box<dyn std::error::Error>> {
        self.server_handle.await??;
        Ok(())
    }
}
