//! End-to-end chat flow over the real in-memory directory and channel-backed
//! delivery, without a network transport.

use std::sync::Arc;

use tokio::sync::mpsc;

use idobata_server::domain::{ConnectionId, UserId};
use idobata_server::infrastructure::{
    delivery::WebSocketMessageDeliverer, directory::InMemoryConnectionDirectory,
};
use idobata_server::usecase::{ChatAction, ChatService};

struct TestRoom {
    service: ChatService,
    deliverer: Arc<WebSocketMessageDeliverer>,
}

impl TestRoom {
    fn new() -> Self {
        let directory = Arc::new(InMemoryConnectionDirectory::new());
        let deliverer = Arc::new(WebSocketMessageDeliverer::new());
        let service = ChatService::new(directory, deliverer.clone());
        Self { service, deliverer }
    }

    /// Register a delivery channel and connect the user, returning the
    /// receiving end of the channel.
    async fn join(
        &self,
        connection_id: &str,
        user_id: &str,
    ) -> mpsc::UnboundedReceiver<String> {
        let connection_id = ConnectionId::new(connection_id);
        let (tx, rx) = mpsc::unbounded_channel();
        self.deliverer.register(&connection_id, tx).await;

        let outcomes = self
            .service
            .on_connect(connection_id, UserId::new(user_id))
            .await;
        assert!(outcomes.iter().all(|outcome| outcome.is_ok()));

        rx
    }
}

fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<String> {
    let mut messages = Vec::new();
    while let Ok(message) = rx.try_recv() {
        messages.push(message);
    }
    messages
}

#[tokio::test]
async fn test_full_chat_session() {
    let room = TestRoom::new();

    // alice joins an empty room: welcome plus her own join notice
    let mut alice_rx = room.join("conn-alice", "alice").await;
    let messages = drain(&mut alice_rx);
    assert_eq!(messages.len(), 2);
    assert!(messages[0].contains("\"type\":\"WelcomeMessage\""));
    assert!(messages[1].contains("\"type\":\"JoinMessage\""));
    assert!(messages[1].contains(r#""currentUsers":["alice"]"#));

    // bob joins: alice sees the join notice, bob sees welcome + join
    let mut bob_rx = room.join("conn-bob", "bob").await;
    let alice_messages = drain(&mut alice_rx);
    assert_eq!(alice_messages.len(), 1);
    assert!(alice_messages[0].contains(r#""currentUsers":["alice","bob"]"#));
    let bob_messages = drain(&mut bob_rx);
    assert_eq!(bob_messages.len(), 2);

    // alice sends a room message: both receive the identical payload
    let outcomes = room
        .service
        .on_action(
            ConnectionId::new("conn-alice"),
            ChatAction::RoomMessage {
                message: "hello everyone".to_string(),
            },
        )
        .await;
    assert_eq!(outcomes.len(), 2);
    let alice_messages = drain(&mut alice_rx);
    let bob_messages = drain(&mut bob_rx);
    assert_eq!(alice_messages, bob_messages);
    assert_eq!(
        alice_messages,
        vec![r#"{"type":"RoomMessage","from":"alice","message":"hello everyone"}"#.to_string()]
    );

    // bob sends alice a direct message: only alice receives it
    let outcomes = room
        .service
        .on_action(
            ConnectionId::new("conn-bob"),
            ChatAction::DirectMessage {
                to: "alice".to_string(),
                message: "hi alice".to_string(),
            },
        )
        .await;
    assert_eq!(outcomes.len(), 1);
    assert!(drain(&mut bob_rx).is_empty());
    assert_eq!(
        drain(&mut alice_rx),
        vec![r#"{"type":"DirectMessage","to":"alice","from":"bob","message":"hi alice"}"#.to_string()]
    );

    // bob asks for the user list: the response goes to his connection alone
    let outcomes = room
        .service
        .on_action(ConnectionId::new("conn-bob"), ChatAction::UserlistRequest)
        .await;
    assert_eq!(outcomes.len(), 1);
    assert!(drain(&mut alice_rx).is_empty());
    assert_eq!(
        drain(&mut bob_rx),
        vec![r#"{"type":"UserlistResponseMessage","userIds":["alice","bob"]}"#.to_string()]
    );

    // bob leaves: alice is told, with bob gone from the embedded list
    let bob_conn = ConnectionId::new("conn-bob");
    let outcomes = room.service.on_disconnect(bob_conn.clone()).await;
    assert!(outcomes.iter().all(|outcome| outcome.is_ok()));
    room.deliverer.unregister(&bob_conn).await;
    assert_eq!(
        drain(&mut alice_rx),
        vec![
            r#"{"type":"LeaveMessage","message":"bobさんが退出しました。","currentUsers":["alice"]}"#
                .to_string()
        ]
    );
}

#[tokio::test]
async fn test_second_device_of_a_user_stays_quiet() {
    let room = TestRoom::new();

    let mut alice_rx = room.join("conn-alice", "alice").await;
    drain(&mut alice_rx);

    // alice opens a second connection: welcome only, no join notice
    let mut alice_phone_rx = room.join("conn-alice-phone", "alice").await;
    let messages = drain(&mut alice_phone_rx);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("\"type\":\"WelcomeMessage\""));
    assert!(drain(&mut alice_rx).is_empty());

    // the first device disconnects: alice is still in the room, nobody is
    // told anything
    let outcomes = room
        .service
        .on_disconnect(ConnectionId::new("conn-alice"))
        .await;
    assert_eq!(outcomes, vec![Ok(())]);
    assert!(drain(&mut alice_phone_rx).is_empty());
}
