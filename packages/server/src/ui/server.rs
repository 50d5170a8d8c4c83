//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::domain::ConnectionDirectory;
use crate::infrastructure::delivery::WebSocketMessageDeliverer;
use crate::usecase::ChatService;

use super::{
    handler::{debug_connections, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat relay server.
pub struct Server {
    /// Connection directory (storage abstraction).
    directory: Arc<dyn ConnectionDirectory>,
    /// Delivery channel registry shared with the WebSocket handler.
    deliverer: Arc<WebSocketMessageDeliverer>,
    /// Chat orchestrator.
    chat_service: Arc<ChatService>,
}

impl Server {
    pub fn new(
        directory: Arc<dyn ConnectionDirectory>,
        deliverer: Arc<WebSocketMessageDeliverer>,
        chat_service: Arc<ChatService>,
    ) -> Self {
        Self {
            directory,
            deliverer,
            chat_service,
        }
    }

    /// Run the relay until a shutdown signal arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails or the server loop
    /// errors out.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            chat_service: self.chat_service,
            deliverer: self.deliverer,
            directory: self.directory,
        });

        let app = Router::new()
            // WebSocket endpoint
            .route("/ws", get(websocket_handler))
            // HTTP endpoints
            .route("/api/health", get(health_check))
            .route("/debug/connections", get(debug_connections))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat relay listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws?user=<user_id>", bind_addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
