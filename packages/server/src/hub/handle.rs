//! Cloneable access to a running hub.

use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};

use crate::domain::{ClientHandle, ClientId, Payload};

use super::stats::HubStats;

/// Errors returned when talking to the hub
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HubError {
    /// The hub loop has stopped and no longer accepts requests
    #[error("hub is no longer running")]
    Closed,
}

/// A join request and the channel used to acknowledge it once applied
pub(super) type JoinRequest = (ClientHandle, oneshot::Sender<()>);

/// Sending side of the hub's three intakes.
///
/// Leave and forward only enqueue a request; the hub loop applies it later,
/// in submission order per intake. Join waits for the hub.
#[derive(Debug, Clone)]
pub struct HubHandle {
    pub(super) join_tx: mpsc::Sender<JoinRequest>,
    pub(super) leave_tx: mpsc::Sender<ClientId>,
    pub(super) forward_tx: mpsc::Sender<Payload>,
    pub(super) stats_rx: watch::Receiver<HubStats>,
    pub(super) outbound_capacity: usize,
}

impl HubHandle {
    /// Register a client and wait until the hub has applied the join.
    ///
    /// Anything the caller submits afterwards, including its leave, is
    /// therefore processed after the client is registered. The same handle
    /// must not be joined twice.
    pub async fn join(&self, handle: ClientHandle) -> Result<(), HubError> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.join_tx
            .send((handle, ack_tx))
            .await
            .map_err(|_| HubError::Closed)?;
        ack_rx.await.map_err(|_| HubError::Closed)
    }

    /// Unregister a client. Leaving a client that is not registered is a no-op.
    pub async fn leave(&self, id: ClientId) -> Result<(), HubError> {
        self.leave_tx.send(id).await.map_err(|_| HubError::Closed)
    }

    /// Submit a payload for broadcast to every registered client.
    pub async fn forward(&self, payload: Payload) -> Result<(), HubError> {
        self.forward_tx
            .send(payload)
            .await
            .map_err(|_| HubError::Closed)
    }

    /// Latest published stats.
    pub fn stats(&self) -> HubStats {
        *self.stats_rx.borrow()
    }

    /// Receiver notified whenever the hub publishes new stats.
    pub fn subscribe_stats(&self) -> watch::Receiver<HubStats> {
        self.stats_rx.clone()
    }

    /// Capacity used for outbound queues of clients joining this hub.
    pub fn outbound_capacity(&self) -> usize {
        self.outbound_capacity
    }

    /// Whether the hub loop has stopped.
    pub fn is_closed(&self) -> bool {
        self.forward_tx.is_closed()
    }
}
