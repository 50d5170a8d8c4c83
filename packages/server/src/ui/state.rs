//! Shared application state for the transport handlers.

use std::sync::Arc;

use crate::domain::ConnectionDirectory;
use crate::infrastructure::delivery::WebSocketMessageDeliverer;
use crate::usecase::ChatService;

/// Shared application state
pub struct AppState {
    /// Chat orchestrator (application logic).
    pub chat_service: Arc<ChatService>,
    /// Delivery channel registry; the WebSocket handler registers and
    /// unregisters channels following the connection lifecycle.
    pub deliverer: Arc<WebSocketMessageDeliverer>,
    /// Connection directory (read access for debug endpoints).
    pub directory: Arc<dyn ConnectionDirectory>,
}
