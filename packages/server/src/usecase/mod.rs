//! UseCase layer: message addressing and the chat orchestrator.

pub mod action;
pub mod addressing;
pub mod chat;
pub mod error;

pub use action::ChatAction;
pub use addressing::resolve_message_target;
pub use chat::ChatService;
pub use error::{ChatError, DeliveryOutcome};
