//! Chat orchestrator.
//!
//! Stateless application logic reacting to lifecycle events (connect,
//! disconnect) and chat actions (room message, direct message, user-list
//! request). Every operation consults the connection directory, constructs
//! outbound messages, and drives delivery through message addressing and the
//! deliverer contract, aggregating one outcome per recipient.
//!
//! The orchestrator holds no locks and caches nothing across calls; the
//! directory is the single source of truth, and its save/remove atomicity is
//! the only concurrency control relied upon.

use std::sync::Arc;

use futures_util::future::join_all;

use crate::domain::{
    Connection, ConnectionDirectory, ConnectionId, DirectoryError, MessageDeliverer,
    OutboundMessage, User, UserId,
};

use super::{
    action::ChatAction,
    addressing::resolve_message_target,
    error::{ChatError, DeliveryOutcome},
};

/// The chat relay's application service.
pub struct ChatService {
    /// Connection directory (storage abstraction).
    directory: Arc<dyn ConnectionDirectory>,
    /// Per-connection message delivery (transport abstraction).
    deliverer: Arc<dyn MessageDeliverer>,
}

impl ChatService {
    pub fn new(directory: Arc<dyn ConnectionDirectory>, deliverer: Arc<dyn MessageDeliverer>) -> Self {
        Self {
            directory,
            deliverer,
        }
    }

    /// Handle a new connection claiming `user_id`.
    ///
    /// The distinct-user snapshot is taken before registration; it decides
    /// whether the user is new to the room. A rejected registration yields a
    /// single failure outcome and nothing is sent. Otherwise a welcome goes
    /// to the new connection alone, and a join notice is broadcast only when
    /// the user was not present before.
    pub async fn on_connect(
        &self,
        connection_id: ConnectionId,
        user_id: UserId,
    ) -> Vec<DeliveryOutcome> {
        let current_users = match self.unique_user_ids().await {
            Ok(users) => users,
            Err(e) => return vec![Err(e.into())],
        };

        let connection = Connection::new(connection_id.clone(), User::new(user_id.clone()));
        if let Err(e) = self.directory.save(connection).await {
            return vec![Err(e.into())];
        }

        let mut outcomes = self.send(&OutboundMessage::welcome(connection_id)).await;

        if !current_users.contains(&user_id) {
            let mut users_after_join = current_users;
            users_after_join.push(user_id.clone());
            outcomes.extend(
                self.send(&OutboundMessage::join(&user_id, users_after_join))
                    .await,
            );
        }

        outcomes
    }

    /// Handle a closed connection.
    ///
    /// Resolves the owning user first; an unknown connection yields a single
    /// failure outcome and no directory mutation. A leave notice is broadcast
    /// only when the user has no connections left after removal.
    pub async fn on_disconnect(&self, connection_id: ConnectionId) -> Vec<DeliveryOutcome> {
        let user = match self.resolve_user_of(&connection_id).await {
            Ok(user) => user,
            Err(e) => return vec![Err(e)],
        };

        if let Err(e) = self.directory.remove(&connection_id).await {
            return vec![Err(e.into())];
        }

        let current_users = match self.unique_user_ids().await {
            Ok(users) => users,
            Err(e) => return vec![Err(e.into())],
        };

        if current_users.contains(&user.id) {
            // Other connections of the same user remain; nothing to announce.
            vec![Ok(())]
        } else {
            self.send(&OutboundMessage::leave(&user.id, current_users))
                .await
        }
    }

    /// Dispatch one inbound chat action.
    pub async fn on_action(
        &self,
        connection_id: ConnectionId,
        action: ChatAction,
    ) -> Vec<DeliveryOutcome> {
        match action {
            ChatAction::RoomMessage { message } => {
                self.on_room_message(connection_id, message).await
            }
            ChatAction::DirectMessage { to, message } => {
                self.on_direct_message(connection_id, to, message).await
            }
            ChatAction::UserlistRequest => self.on_userlist_request(connection_id).await,
            ChatAction::Unknown => vec![Err(ChatError::InvalidAction(
                "unrecognized action type".to_string(),
            ))],
        }
    }

    async fn on_room_message(
        &self,
        connection_id: ConnectionId,
        message: String,
    ) -> Vec<DeliveryOutcome> {
        let sender = match self.resolve_user_of(&connection_id).await {
            Ok(user) => user,
            Err(e) => return vec![Err(e)],
        };

        self.send(&OutboundMessage::room(sender.id, message)).await
    }

    async fn on_direct_message(
        &self,
        connection_id: ConnectionId,
        to: String,
        message: String,
    ) -> Vec<DeliveryOutcome> {
        let sender = match self.resolve_user_of(&connection_id).await {
            Ok(user) => user,
            Err(e) => return vec![Err(e)],
        };

        self.send(&OutboundMessage::direct(UserId::new(to), sender.id, message))
            .await
    }

    async fn on_userlist_request(&self, connection_id: ConnectionId) -> Vec<DeliveryOutcome> {
        let user_ids = match self.unique_user_ids().await {
            Ok(users) => users,
            Err(e) => return vec![Err(e.into())],
        };

        self.send(&OutboundMessage::userlist_response(connection_id, user_ids))
            .await
    }

    /// Distinct user ids of all current connections, first-seen order.
    pub async fn unique_user_ids(&self) -> Result<Vec<UserId>, DirectoryError> {
        let connections = self.directory.find_all().await?;

        let mut user_ids: Vec<UserId> = Vec::new();
        for connection in connections {
            if !user_ids.contains(&connection.user.id) {
                user_ids.push(connection.user.id);
            }
        }

        Ok(user_ids)
    }

    async fn resolve_user_of(&self, connection_id: &ConnectionId) -> Result<User, ChatError> {
        match self.directory.find_by_id(connection_id).await {
            Ok(Some(connection)) => Ok(connection.user),
            Ok(None) => Err(ChatError::UserUnresolved(
                connection_id.as_str().to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve the message target and deliver to every resolved connection.
    ///
    /// Deliveries are issued concurrently and all attempted even if some
    /// fail; the result carries exactly one outcome per resolved connection.
    async fn send(&self, message: &OutboundMessage) -> Vec<DeliveryOutcome> {
        let connection_ids =
            match resolve_message_target(self.directory.as_ref(), &message.target()).await {
                Ok(ids) => ids,
                Err(e) => return vec![Err(e.into())],
            };

        let message_text = message.to_json_string();
        let deliveries = connection_ids
            .iter()
            .map(|connection_id| self.deliverer.deliver(connection_id, &message_text));

        join_all(deliveries)
            .await
            .into_iter()
            .map(|result| result.map_err(ChatError::from))
            .collect()
    }
}
