//! Client error definitions.

use thiserror::Error;

/// Errors that end a client session
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Failed to start line editor: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}
