//! Abstract message addressee.

use super::{ConnectionId, UserId};

/// Where an outbound message should go: one connection, every connection of
/// one user, or every currently known connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageTarget {
    Connection(ConnectionId),
    User(UserId),
    Broadcast,
}
