//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{WebSocket, WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    },
    response::{IntoResponse, Response},
};
use futures_util::stream::StreamExt;

use crate::{
    hub::Client,
    ui::{pump::run_session, state::AppState},
};

pub async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    // A failed upgrade only affects this request; nothing has joined yet
    let ws = match upgrade {
        Ok(ws) => ws,
        Err(rejection) => {
            tracing::warn!("WebSocket upgrade rejected: {}", rejection);
            return rejection.into_response();
        }
    };

    let connection = state.connection;
    ws.read_buffer_size(connection.read_buffer_size)
        .write_buffer_size(connection.write_buffer_size)
        .max_message_size(connection.max_message_size)
        .on_failed_upgrade(|err| tracing::warn!("WebSocket upgrade failed: {}", err))
        .on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let client = match Client::connect(&state.hub).await {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to join hub: {}", e);
            return;
        }
    };
    tracing::info!("Client '{}' connected", client.id());

    let (sender, receiver) = socket.split();
    run_session(client, sender, receiver, state.connection).await;
}
