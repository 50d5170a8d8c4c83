//! Message delivery implementations.
//!
//! Currently WebSocket only; the orchestrator depends on the
//! `MessageDeliverer` trait and does not care what carries the bytes.

pub mod websocket;

pub use websocket::{DeliveryChannel, WebSocketMessageDeliverer};
