//! UI layer: WebSocket/HTTP transport over the chat orchestrator.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
