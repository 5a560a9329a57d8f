//! Interactive command line client for the broadcast hub.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hubcast-client -- --url ws://127.0.0.1:8080/ws --name alice
//! ```

use clap::Parser;
use hubcast_shared::logger::setup_logger;

#[derive(Debug, Parser)]
#[command(name = "hubcast-client", version, about = "Chat over a hubcast broadcast hub")]
struct Args {
    /// WebSocket URL of the hub
    #[arg(short, long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// Name prefixed to every line you send
    #[arg(short, long)]
    name: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Keep logs quiet so they do not interleave with the conversation
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    if let Err(e) = hubcast_client::run_client(&args.url, args.name.as_deref()).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
