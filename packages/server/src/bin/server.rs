//! Idobata chat relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin idobata-server
//! cargo run --bin idobata-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;

use idobata_server::{
    infrastructure::{
        delivery::WebSocketMessageDeliverer, directory::InMemoryConnectionDirectory,
    },
    ui::Server,
    usecase::ChatService,
};
use idobata_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "idobata-server")]
#[command(about = "WebSocket chat relay with directed and broadcast messaging", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Connection directory
    // 2. Message deliverer
    // 3. Chat service
    // 4. Server

    let directory = Arc::new(InMemoryConnectionDirectory::new());
    let deliverer = Arc::new(WebSocketMessageDeliverer::new());
    let chat_service = Arc::new(ChatService::new(directory.clone(), deliverer.clone()));

    let server = Server::new(directory, deliverer, chat_service);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
