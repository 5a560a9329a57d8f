//! WebSocket broadcast hub server.
//!
//! Every message received from a client is broadcast to all connected clients.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hubcast-server -- --port 8080 --trace
//! ```

use std::time::Duration;

use clap::Parser;
use hubcast_server::{ConnectionConfig, HubConfig, ServerConfig, config};
use hubcast_shared::logger::setup_logger;

#[derive(Debug, Parser)]
#[command(name = "hubcast-server", version, about = "WebSocket broadcast hub server")]
struct Args {
    /// Host address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Messages a client may have pending before it is dropped
    #[arg(long, default_value_t = config::DEFAULT_OUTBOUND_CAPACITY)]
    outbound_capacity: usize,

    /// Buffered join/leave/forward requests per hub intake
    #[arg(long, default_value_t = config::DEFAULT_INTAKE_CAPACITY)]
    intake_capacity: usize,

    /// WebSocket read buffer size in bytes
    #[arg(long, default_value_t = config::DEFAULT_SOCKET_BUFFER_SIZE)]
    read_buffer_size: usize,

    /// WebSocket write buffer size in bytes
    #[arg(long, default_value_t = config::DEFAULT_SOCKET_BUFFER_SIZE)]
    write_buffer_size: usize,

    /// Largest accepted inbound message in bytes
    #[arg(long, default_value_t = config::DEFAULT_MAX_MESSAGE_SIZE)]
    max_message_size: usize,

    /// Seconds between liveness pings
    #[arg(long, default_value_t = config::DEFAULT_PING_INTERVAL.as_secs())]
    ping_interval: u64,

    /// Seconds of silence before a connection is dropped
    #[arg(long, default_value_t = config::DEFAULT_PONG_TIMEOUT.as_secs())]
    pong_timeout: u64,

    /// Seconds allowed for writing one frame
    #[arg(long, default_value_t = config::DEFAULT_WRITE_TIMEOUT.as_secs())]
    write_timeout: u64,

    /// Log every hub trace event (join, leave, receive, send, eviction)
    #[arg(long)]
    trace: bool,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            trace: args.trace,
            hub: HubConfig {
                outbound_capacity: args.outbound_capacity,
                intake_capacity: args.intake_capacity,
            },
            connection: ConnectionConfig {
                read_buffer_size: args.read_buffer_size,
                write_buffer_size: args.write_buffer_size,
                max_message_size: args.max_message_size,
                ping_interval: Duration::from_secs(args.ping_interval),
                pong_timeout: Duration::from_secs(args.pong_timeout),
                write_timeout: Duration::from_secs(args.write_timeout),
            },
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Trace events are emitted at debug level
    let level = if args.trace { "debug" } else { args.log_level.as_str() };
    setup_logger(env!("CARGO_BIN_NAME"), level);

    // Run the server
    if let Err(e) = hubcast_server::run_server(args.into()).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
