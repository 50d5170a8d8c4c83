//! WebSocket connection handlers.
//!
//! The transport assigns each accepted socket a fresh connection id, wires up
//! its delivery channel, and drives the chat orchestrator through the
//! connection lifecycle: connect on upgrade, one action per inbound text
//! frame, disconnect on teardown. Failed outcomes are logged and the protocol
//! event is acknowledged regardless; the orchestrator never retries.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::{
    domain::{ConnectionId, DirectoryError, UserId},
    usecase::{ChatAction, ChatError, DeliveryOutcome},
    ui::state::AppState,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub user: String,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    if query.user.trim().is_empty() {
        tracing::warn!("Rejecting connection with empty user id");
        return Err(StatusCode::BAD_REQUEST);
    }
    let user_id = UserId::new(query.user);

    // The transport assigns the connection id.
    let connection_id = ConnectionId::new(Uuid::new_v4().to_string());

    // Register the delivery channel before running on_connect so the welcome
    // and join notices are buffered until the socket task starts draining.
    let (tx, rx) = mpsc::unbounded_channel();
    state.deliverer.register(&connection_id, tx).await;

    let outcomes = state
        .chat_service
        .on_connect(connection_id.clone(), user_id.clone())
        .await;

    match outcomes.as_slice() {
        [Err(ChatError::Directory(DirectoryError::DuplicateConnectionId(_)))] => {
            tracing::warn!(
                "Connection id '{}' is already registered. Rejecting connection.",
                connection_id
            );
            state.deliverer.unregister(&connection_id).await;
            Err(StatusCode::CONFLICT)
        }
        [Err(ChatError::Directory(e))] => {
            tracing::error!("Failed to register connection '{}': {}", connection_id, e);
            state.deliverer.unregister(&connection_id).await;
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
        _ => {
            log_failed_outcomes("connect", &connection_id, &outcomes);
            tracing::info!("User '{}' connected as '{}'", user_id, connection_id);
            Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id, rx)))
        }
    }
}

/// Spawns a task draining the delivery channel into the WebSocket sink.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(message_text) = rx.recv().await {
            if sender.send(Message::Text(message_text.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    connection_id: ConnectionId,
    rx: mpsc::UnboundedReceiver<String>,
) {
    let (sender, mut receiver) = socket.split();
    let pusher_task = pusher_loop(rx, sender);

    while let Some(Ok(frame)) = receiver.next().await {
        match frame {
            Message::Text(text) => match serde_json::from_str::<ChatAction>(text.as_str()) {
                Ok(action) => {
                    let outcomes = state
                        .chat_service
                        .on_action(connection_id.clone(), action)
                        .await;
                    log_failed_outcomes("action", &connection_id, &outcomes);
                }
                Err(e) => {
                    tracing::warn!("Unparsable frame from '{}': {}", connection_id, e);
                }
            },
            Message::Close(_) => break,
            _ => {}
        }
    }

    let outcomes = state
        .chat_service
        .on_disconnect(connection_id.clone())
        .await;
    log_failed_outcomes("disconnect", &connection_id, &outcomes);

    state.deliverer.unregister(&connection_id).await;
    pusher_task.abort();
    tracing::info!("Connection '{}' closed", connection_id);
}

fn log_failed_outcomes(event: &str, connection_id: &ConnectionId, outcomes: &[DeliveryOutcome]) {
    for error in outcomes.iter().filter_map(|outcome| outcome.as_ref().err()) {
        tracing::error!(
            "{} handling for connection '{}' reported: {}",
            event,
            connection_id,
            error
        );
    }
}
