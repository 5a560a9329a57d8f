//! Per-connection pumps moving frames between a WebSocket and the hub.
//!
//! The pumps are generic over `futures_util` sinks and streams so the same
//! code drives a real socket and the in-memory doubles used in tests.

use std::fmt::Display;

use axum::extract::ws::Message;
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::{
    config::ConnectionConfig,
    domain::{ClientId, OutboundQueue, Payload},
    hub::{Client, HubHandle},
};

/// Why a pump stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PumpExit {
    /// The hub closed the outbound queue (leave or eviction)
    QueueClosed,
    /// The peer sent a close frame or the stream ended
    PeerClosed,
    /// Nothing was read within the pong timeout, or a write stalled
    Timeout,
    /// The transport reported an error
    TransportError(String),
    /// The hub is no longer running
    HubClosed,
}

/// Convert a payload to a frame: text when it is valid UTF-8, binary otherwise.
fn to_message(payload: Payload) -> Message {
    match String::from_utf8(payload.to_vec()) {
        Ok(text) => Message::Text(text.into()),
        Err(_) => Message::Binary(payload),
    }
}

async fn send_frame<S>(
    sink: &mut S,
    message: Message,
    config: &ConnectionConfig,
) -> Result<(), PumpExit>
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    match time::timeout(config.write_timeout, sink.send(message)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(PumpExit::TransportError(err.to_string())),
        Err(_) => Err(PumpExit::Timeout),
    }
}

/// Drain the outbound queue into `sink`, pinging the peer while idle.
///
/// Ends when the queue is closed or a write fails. On a closed queue a close
/// frame is sent before returning.
pub async fn write_pump<S>(
    mut sink: S,
    mut queue: OutboundQueue,
    config: ConnectionConfig,
) -> PumpExit
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    let first_ping = Instant::now() + config.ping_interval;
    let mut ticker = time::interval_at(first_ping, config.ping_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            next = queue.recv() => {
                let Some(payload) = next else {
                    // best effort: the peer may already be gone
                    let _ = send_frame(&mut sink, Message::Close(None), &config).await;
                    return PumpExit::QueueClosed;
                };
                if let Err(exit) = send_frame(&mut sink, to_message(payload), &config).await {
                    return exit;
                }
            }
            _ = ticker.tick() => {
                let ping = Message::Ping(Payload::new());
                if let Err(exit) = send_frame(&mut sink, ping, &config).await {
                    return exit;
                }
            }
        }
    }
}

/// Read frames from `stream` and forward their payloads to the hub.
///
/// Every frame, pongs included, resets the pong timeout. Ends on a close
/// frame, end of stream, a read error, the timeout, or a stopped hub.
pub async fn read_pump<St, E>(
    mut stream: St,
    hub: HubHandle,
    id: ClientId,
    config: ConnectionConfig,
) -> PumpExit
where
    St: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
{
    loop {
        let next = match time::timeout(config.pong_timeout, stream.next()).await {
            Ok(next) => next,
            Err(_) => return PumpExit::Timeout,
        };

        let payload = match next {
            Some(Ok(Message::Text(text))) => Payload::copy_from_slice(text.as_str().as_bytes()),
            Some(Ok(Message::Binary(bytes))) => bytes,
            Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
            Some(Ok(Message::Close(_))) | None => return PumpExit::PeerClosed,
            Some(Err(err)) => return PumpExit::TransportError(err.to_string()),
        };

        tracing::debug!("Received {} bytes from '{}'", payload.len(), id);
        if hub.forward(payload).await.is_err() {
            return PumpExit::HubClosed;
        }
    }
}

/// Run both pumps for a joined client and leave the hub when either ends.
///
/// The write pump runs on its own task. Whichever pump finishes first stops
/// the other. Leave is always sent, which is a no-op if the hub already
/// evicted the client.
pub async fn run_session<S, St, E>(
    client: Client,
    sink: S,
    stream: St,
    config: ConnectionConfig,
) -> PumpExit
where
    S: Sink<Message> + Unpin + Send + 'static,
    S::Error: Display + Send,
    St: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
{
    let id = client.id();
    let (queue, hub) = client.into_parts();

    let mut write_task = tokio::spawn(write_pump(sink, queue, config));
    let read = read_pump(stream, hub.clone(), id, config);
    tokio::pin!(read);

    let exit = tokio::select! {
        exit = &mut read => {
            write_task.abort();
            exit
        }
        joined = &mut write_task => match joined {
            Ok(exit) => exit,
            Err(err) => PumpExit::TransportError(err.to_string()),
        },
    };
    tracing::info!("Client '{}' disconnected: {:?}", id, exit);

    if let Err(err) = hub.leave(id).await {
        tracing::warn!("Failed to leave hub for '{}': {}", id, err);
    }
    exit
}
