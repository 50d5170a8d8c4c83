//! Connection directory trait definition.
//!
//! The domain layer defines the interface it needs for connection↔user
//! storage; the infrastructure layer provides the implementation (dependency
//! inversion). Any backing store satisfying these semantics is
//! interchangeable, and `save`/`remove` atomicity is the sole concurrency
//! guard the relay relies on.

use async_trait::async_trait;
use thiserror::Error;

use super::{Connection, ConnectionId, UserId};

/// Errors surfaced by a connection directory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// `save` was rejected because the connection id is already registered.
    #[error("connection id '{0}' is already registered")]
    DuplicateConnectionId(String),

    /// `remove` was called for a connection id the directory does not hold.
    #[error("connection '{0}' is not found")]
    ConnectionNotFound(String),

    /// The storage layer itself failed; the cause is reported as-is.
    #[error("directory storage error: {0}")]
    Storage(String),
}

/// Store of current connection↔user associations.
///
/// Queried by connection id and by user id; a connection exists here if and
/// only if the transport-level channel it represents is currently open.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionDirectory: Send + Sync {
    /// Look up one connection by its id.
    async fn find_by_id(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Option<Connection>, DirectoryError>;

    /// All connections currently bound to the user (empty if none).
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Connection>, DirectoryError>;

    /// Every currently known connection.
    async fn find_all(&self) -> Result<Vec<Connection>, DirectoryError>;

    /// Register a connection. Fails with `DuplicateConnectionId` if a
    /// connection with the same id already exists.
    async fn save(&self, connection: Connection) -> Result<(), DirectoryError>;

    /// Remove a connection. Fails with `ConnectionNotFound` if absent.
    async fn remove(&self, connection_id: &ConnectionId) -> Result<(), DirectoryError>;
}
