//! Outbound message model.
//!
//! One variant per wire message. Each message is immutable, constructed fresh
//! per event, carries its own target, and serializes deterministically to the
//! JSON the clients expect (`type` tag plus the variant's fields; target
//! fields never appear on the wire).

use serde::Serialize;

use super::{ConnectionId, MessageTarget, UserId};

/// Outbound payload addressed at an abstract target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum OutboundMessage {
    WelcomeMessage {
        #[serde(skip)]
        target: ConnectionId,
        message: String,
    },
    JoinMessage {
        message: String,
        #[serde(rename = "currentUsers")]
        current_users: Vec<UserId>,
    },
    LeaveMessage {
        message: String,
        #[serde(rename = "currentUsers")]
        current_users: Vec<UserId>,
    },
    RoomMessage {
        from: UserId,
        message: String,
    },
    DirectMessage {
        to: UserId,
        from: UserId,
        message: String,
    },
    UserlistResponseMessage {
        #[serde(skip)]
        target: ConnectionId,
        #[serde(rename = "userIds")]
        user_ids: Vec<UserId>,
    },
}

impl OutboundMessage {
    /// Welcome notice for a newly accepted connection.
    pub fn welcome(target: ConnectionId) -> Self {
        Self::WelcomeMessage {
            target,
            message: "ようこそチャットルームへ!!".to_string(),
        }
    }

    /// Room-wide notice that a user joined, carrying the user list after the
    /// join.
    pub fn join(user_id: &UserId, current_users: Vec<UserId>) -> Self {
        Self::JoinMessage {
            message: format!("{}さんが入室しました。あいさつしまししょう。", user_id),
            current_users,
        }
    }

    /// Room-wide notice that a user left, carrying the user list after the
    /// leave.
    pub fn leave(user_id: &UserId, current_users: Vec<UserId>) -> Self {
        Self::LeaveMessage {
            message: format!("{}さんが退出しました。", user_id),
            current_users,
        }
    }

    /// Chat message to the whole room.
    pub fn room(from: UserId, message: String) -> Self {
        Self::RoomMessage { from, message }
    }

    /// Chat message to every connection of one user.
    pub fn direct(to: UserId, from: UserId, message: String) -> Self {
        Self::DirectMessage { to, from, message }
    }

    /// Response to a user-list request, sent to the requesting connection
    /// only.
    pub fn userlist_response(target: ConnectionId, user_ids: Vec<UserId>) -> Self {
        Self::UserlistResponseMessage { target, user_ids }
    }

    /// The abstract addressee of this message.
    pub fn target(&self) -> MessageTarget {
        match self {
            Self::WelcomeMessage { target, .. } | Self::UserlistResponseMessage { target, .. } => {
                MessageTarget::Connection(target.clone())
            }
            Self::JoinMessage { .. } | Self::LeaveMessage { .. } | Self::RoomMessage { .. } => {
                MessageTarget::Broadcast
            }
            Self::DirectMessage { to, .. } => MessageTarget::User(to.clone()),
        }
    }

    /// Deterministic wire serialization.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}
