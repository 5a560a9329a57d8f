//! Trace events emitted by the hub and the collaborator that receives them.

use std::fmt;

use super::{ClientId, client::Payload};

/// A discrete, human readable event in the life of the hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    ClientJoined(ClientId),
    ClientLeft(ClientId),
    MessageReceived(Payload),
    Sent(ClientId),
    SendFailed(ClientId),
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientJoined(id) => write!(f, "client joined ({id})"),
            Self::ClientLeft(id) => write!(f, "client left ({id})"),
            Self::MessageReceived(payload) => {
                write!(f, "message received: {}", String::from_utf8_lossy(payload))
            }
            Self::Sent(id) => write!(f, " -- sent ({id})"),
            Self::SendFailed(id) => write!(f, " -- send failed, cleaned up ({id})"),
        }
    }
}

/// Receives trace events from the hub.
///
/// Implementations must not block: they are called from inside the hub loop.
#[cfg_attr(test, mockall::automock)]
pub trait Tracer: Send + Sync {
    fn trace(&self, event: &TraceEvent);
}
