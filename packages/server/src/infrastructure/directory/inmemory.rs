//! In-memory connection directory.
//!
//! Implements the domain's `ConnectionDirectory` trait over an
//! insertion-ordered list guarded by a mutex, so broadcast resolution and the
//! user lists embedded in room notices come out in connect order.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Connection, ConnectionDirectory, ConnectionId, DirectoryError, UserId};

/// Insertion-ordered in-memory implementation of `ConnectionDirectory`.
pub struct InMemoryConnectionDirectory {
    connections: Mutex<Vec<Connection>>,
}

impl InMemoryConnectionDirectory {
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryConnectionDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectionDirectory for InMemoryConnectionDirectory {
    async fn find_by_id(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Option<Connection>, DirectoryError> {
        let connections = self.connections.lock().await;
        Ok(connections
            .iter()
            .find(|connection| &connection.id == connection_id)
            .cloned())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Connection>, DirectoryError> {
        let connections = self.connections.lock().await;
        Ok(connections
            .iter()
            .filter(|connection| &connection.user.id == user_id)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Connection>, DirectoryError> {
        let connections = self.connections.lock().await;
        Ok(connections.clone())
    }

    async fn save(&self, connection: Connection) -> Result<(), DirectoryError> {
        let mut connections = self.connections.lock().await;
        if connections.iter().any(|existing| existing.id == connection.id) {
            return Err(DirectoryError::DuplicateConnectionId(
                connection.id.as_str().to_string(),
            ));
        }

        tracing::debug!(
            "Connection '{}' of user '{}' registered",
            connection.id,
            connection.user.id
        );
        connections.push(connection);
        Ok(())
    }

    async fn remove(&self, connection_id: &ConnectionId) -> Result<(), DirectoryError> {
        let mut connections = self.connections.lock().await;
        let Some(position) = connections
            .iter()
            .position(|connection| &connection.id == connection_id)
        else {
            return Err(DirectoryError::ConnectionNotFound(
                connection_id.as_str().to_string(),
            ));
        };

        connections.remove(position);
        tracing::debug!("Connection '{}' removed", connection_id);
        Ok(())
    }
}
