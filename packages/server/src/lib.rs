//! Idobata chat relay library.
//!
//! Clients connect over WebSocket, are identified by a user id, and exchange
//! broadcast messages, direct messages, and room notices. The core tracks
//! which connections belong to which user, resolves abstract message targets
//! into concrete connections, and fans messages out while isolating
//! per-connection delivery failures.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
