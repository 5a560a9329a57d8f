//! Test fixtures shared by the integration tests.

#![allow(dead_code)]

use std::{net::SocketAddr, time::Duration};

use futures_util::{SinkExt, StreamExt};
use hubcast_server::ServerConfig;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type WsClient = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

const WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Server running in-process on an ephemeral port.
///
/// Shut down when dropped.
pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(ServerConfig::default()).await
    }

    pub async fn start_with(config: ServerConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let shutdown = async move {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = hubcast_server::serve(listener, config, shutdown).await {
                panic!("Test server failed: {e}");
            }
        });

        Self {
            addr,
            shutdown: Some(shutdown_tx),
            task,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Connect a WebSocket client and wait until the hub has registered it.
    pub async fn connect(&self) -> WsClient {
        let expected = self.stats().await["clients"].as_u64().unwrap_or(0) + 1;
        let (ws, _response) = connect_async(self.ws_url())
            .await
            .expect("Failed to connect WebSocket");
        self.wait_for_clients(expected).await;
        ws
    }

    pub async fn stats(&self) -> serde_json::Value {
        reqwest::get(format!("{}/api/stats", self.base_url()))
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse JSON")
    }

    /// Poll the stats endpoint until the hub reports `count` clients.
    pub async fn wait_for_clients(&self, count: u64) {
        let deadline = tokio::time::Instant::now() + WAIT_TIMEOUT;
        loop {
            let stats = self.stats().await;
            if stats["clients"].as_u64() == Some(count) {
                return;
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "Timed out waiting for {count} clients, last stats: {stats}"
            );
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        self.task.abort();
    }
}

pub async fn send_text(ws: &mut WsClient, text: &str) {
    ws.send(Message::Text(text.into()))
        .await
        .expect("Failed to send message");
}

/// Next data frame, skipping control frames.
pub async fn next_data(ws: &mut WsClient) -> Message {
    loop {
        let next = tokio::time::timeout(WAIT_TIMEOUT, ws.next())
            .await
            .expect("Timed out waiting for message")
            .expect("Stream ended")
            .expect("WebSocket error");
        if next.is_text() || next.is_binary() {
            return next;
        }
    }
}

pub async fn next_text(ws: &mut WsClient) -> String {
    next_data(ws)
        .await
        .into_text()
        .expect("Expected text message")
        .to_string()
}
