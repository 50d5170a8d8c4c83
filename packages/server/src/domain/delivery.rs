//! Message delivery trait definition.
//!
//! The per-connection send contract consumed by the orchestrator. The
//! transport provides the implementation; the orchestrator records a failure
//! cause without interpreting it.

use async_trait::async_trait;
use thiserror::Error;

use super::ConnectionId;

/// Errors surfaced when delivering to a single connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// No live channel is registered for the connection id.
    #[error("connection '{0}' has no live delivery channel")]
    ConnectionGone(String),

    /// The channel rejected the message.
    #[error("failed to deliver to connection '{0}': {1}")]
    SendFailed(String, String),
}

/// Sends one serialized message to one connection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageDeliverer: Send + Sync {
    async fn deliver(
        &self,
        connection_id: &ConnectionId,
        message_text: &str,
    ) -> Result<(), DeliveryError>;
}
