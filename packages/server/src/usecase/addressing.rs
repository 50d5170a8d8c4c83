//! Message addressing.
//!
//! Expands an abstract [`MessageTarget`] into the concrete connection ids it
//! stands for, using the connection directory. Pure with respect to its
//! inputs given a directory snapshot; performs exactly one directory call per
//! resolution, and none for an already-concrete connection target.

use crate::domain::{ConnectionDirectory, ConnectionId, DirectoryError, MessageTarget};

/// Resolve a target into zero or more concrete connection ids.
///
/// A connection target resolves to itself unchanged; the caller is trusted to
/// hold a valid id at resolution time, and a stale id surfaces as a delivery
/// failure downstream rather than a resolution failure here.
pub async fn resolve_message_target(
    directory: &dyn ConnectionDirectory,
    target: &MessageTarget,
) -> Result<Vec<ConnectionId>, DirectoryError> {
    match target {
        MessageTarget::Connection(connection_id) => Ok(vec![connection_id.clone()]),
        MessageTarget::User(user_id) => Ok(directory
            .find_by_user_id(user_id)
            .await?
            .into_iter()
            .map(|connection| connection.id)
            .collect()),
        MessageTarget::Broadcast => Ok(directory
            .find_all()
            .await?
            .into_iter()
            .map(|connection| connection.id)
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Connection, MockConnectionDirectory, User, UserId};
    use crate::infrastructure::directory::InMemoryConnectionDirectory;

    fn connection(connection_id: &str, user_id: &str) -> Connection {
        Connection::new(
            ConnectionId::new(connection_id),
            User::new(UserId::new(user_id)),
        )
    }

    async fn seeded_directory(connections: Vec<Connection>) -> InMemoryConnectionDirectory {
        let directory = InMemoryConnectionDirectory::new();
        for conn in connections {
            directory.save(conn).await.unwrap();
        }
        directory
    }

    #[tokio::test]
    async fn test_connection_target_resolves_to_itself() {
        // given: an empty directory, so any lookup would return nothing
        let directory = InMemoryConnectionDirectory::new();
        let target = MessageTarget::Connection(ConnectionId::new("conn1"));

        // when:
        let resolved = resolve_message_target(&directory, &target).await.unwrap();

        // then: the id comes back unchanged, independent of directory state
        assert_eq!(resolved, vec![ConnectionId::new("conn1")]);
    }

    #[tokio::test]
    async fn test_user_target_resolves_to_all_connections_of_the_user() {
        // given:
        let directory = seeded_directory(vec![
            connection("conn1", "user1"),
            connection("conn2", "user2"),
            connection("conn3", "user2"),
        ])
        .await;
        let target = MessageTarget::User(UserId::new("user2"));

        // when:
        let resolved = resolve_message_target(&directory, &target).await.unwrap();

        // then:
        assert_eq!(
            resolved,
            vec![ConnectionId::new("conn2"), ConnectionId::new("conn3")]
        );
    }

    #[tokio::test]
    async fn test_user_target_with_no_connections_resolves_to_empty() {
        // given:
        let directory = seeded_directory(vec![connection("conn1", "user1")]).await;
        let target = MessageTarget::User(UserId::new("user9"));

        // when:
        let resolved = resolve_message_target(&directory, &target).await.unwrap();

        // then:
        assert!(resolved.is_empty());
    }

    #[tokio::test]
    async fn test_broadcast_target_resolves_to_every_connection() {
        // given:
        let directory = seeded_directory(vec![
            connection("conn1", "user1"),
            connection("conn2", "user2"),
            connection("conn3", "user2"),
        ])
        .await;

        // when:
        let resolved = resolve_message_target(&directory, &MessageTarget::Broadcast)
            .await
            .unwrap();

        // then: equal to the ids of find_all, none omitted, no duplicates
        assert_eq!(
            resolved,
            vec![
                ConnectionId::new("conn1"),
                ConnectionId::new("conn2"),
                ConnectionId::new("conn3"),
            ]
        );
    }

    #[tokio::test]
    async fn test_broadcast_on_empty_directory_resolves_to_empty() {
        // given:
        let directory = InMemoryConnectionDirectory::new();

        // when:
        let resolved = resolve_message_target(&directory, &MessageTarget::Broadcast)
            .await
            .unwrap();

        // then:
        assert!(resolved.is_empty());
    }

    #[tokio::test]
    async fn test_directory_failure_is_surfaced() {
        // given: a directory whose storage layer fails
        let mut directory = MockConnectionDirectory::new();
        directory
            .expect_find_all()
            .returning(|| Err(DirectoryError::Storage("scan timed out".to_string())));

        // when:
        let result = resolve_message_target(&directory, &MessageTarget::Broadcast).await;

        // then:
        assert_eq!(
            result,
            Err(DirectoryError::Storage("scan timed out".to_string()))
        );
    }
}
