//! WebSocket-backed message delivery.
//!
//! Socket creation happens in the UI layer; this implementation receives the
//! per-connection `UnboundedSender` at registration time and uses it to push
//! serialized messages. Registration and teardown of channels follow the
//! connection lifecycle driven by the WebSocket handler.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};

use crate::domain::{ConnectionId, DeliveryError, MessageDeliverer};

/// Channel over which serialized messages reach one connection's socket task.
pub type DeliveryChannel = mpsc::UnboundedSender<String>;

/// `MessageDeliverer` implementation over per-connection WebSocket channels.
pub struct WebSocketMessageDeliverer {
    /// Live delivery channels, keyed by connection id.
    channels: Mutex<HashMap<String, DeliveryChannel>>,
}

impl WebSocketMessageDeliverer {
    pub fn new() -> Self {
        Self {
            channels: Mutex::new(HashMap::new()),
        }
    }

    /// Register the delivery channel for a connection.
    pub async fn register(&self, connection_id: &ConnectionId, sender: DeliveryChannel) {
        let mut channels = self.channels.lock().await;
        channels.insert(connection_id.as_str().to_string(), sender);
        tracing::debug!("Delivery channel for '{}' registered", connection_id);
    }

    /// Drop the delivery channel of a connection.
    pub async fn unregister(&self, connection_id: &ConnectionId) {
        let mut channels = self.channels.lock().await;
        channels.remove(connection_id.as_str());
        tracing::debug!("Delivery channel for '{}' unregistered", connection_id);
    }
}

impl Default for WebSocketMessageDeliverer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageDeliverer for WebSocketMessageDeliverer {
    async fn deliver(
        &self,
        connection_id: &ConnectionId,
        message_text: &str,
    ) -> Result<(), DeliveryError> {
        let channels = self.channels.lock().await;

        let Some(sender) = channels.get(connection_id.as_str()) else {
            return Err(DeliveryError::ConnectionGone(
                connection_id.as_str().to_string(),
            ));
        };

        sender.send(message_text.to_string()).map_err(|e| {
            DeliveryError::SendFailed(connection_id.as_str().to_string(), e.to_string())
        })?;
        tracing::debug!("Delivered message to connection '{}'", connection_id);
        Ok(())
    }
}
