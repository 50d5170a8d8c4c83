//! Inbound chat actions.
//!
//! Wire shape is `{"type": "...", "payload": {...}}`. Unknown action types
//! deserialize to [`ChatAction::Unknown`] so the orchestrator can report them
//! as invalid-action failures instead of the transport dropping them.

use serde::Deserialize;

/// One chat action sent by a connected client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ChatAction {
    /// Message to the whole room.
    RoomMessage { message: String },

    /// Message to every connection of one user.
    DirectMessage { to: String, message: String },

    /// Request for the distinct list of connected user ids.
    UserlistRequest,

    /// Any action type the relay does not recognize.
    #[serde(other)]
    Unknown,
}
