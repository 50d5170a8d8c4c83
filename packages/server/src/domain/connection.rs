//! Connection and user entities.
//!
//! A `Connection` is one live logical channel between a client and the relay.
//! Multiple connections may share one user id (multi-device, multi-tab). The
//! connection directory owns these records; the orchestrator never caches a
//! copy across calls.

use std::fmt;

use serde::Serialize;

/// Opaque connection identifier, assigned by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable application-level user identity, claimed at connect time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A chat participant, derived from its connections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
}

impl User {
    pub fn new(id: UserId) -> Self {
        Self { id }
    }
}

/// One live logical channel and the user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnectionId,
    pub user: User,
}

impl Connection {
    pub fn new(id: ConnectionId, user: User) -> Self {
        Self { id, user }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_holds_id_and_user() {
        // given:
        let id = ConnectionId::new("conn1");
        let user = User::new(UserId::new("user1"));

        // when:
        let connection = Connection::new(id.clone(), user.clone());

        // then:
        assert_eq!(connection.id, id);
        assert_eq!(connection.user, user);
        assert_eq!(connection.id.as_str(), "conn1");
        assert_eq!(connection.user.id.as_str(), "user1");
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        // given:
        let connection_id = ConnectionId::new("conn1");
        let user_id = UserId::new("user1");

        // then:
        assert_eq!(
            serde_json::to_string(&connection_id).unwrap(),
            r#""conn1""#
        );
        assert_eq!(serde_json::to_string(&user_id).unwrap(), r#""user1""#);
    }
}
