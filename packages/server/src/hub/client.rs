//! Registration glue between a new connection and the hub.

use crate::domain::{ClientHandle, ClientId, OutboundQueue};

use super::handle::{HubError, HubHandle};

/// A connection that has joined a hub.
///
/// Owns the receiving end of its outbound queue and a handle back to the
/// hub it joined. The matching [`ClientHandle`] lives in the hub's registry.
#[derive(Debug)]
pub struct Client {
    queue: OutboundQueue,
    hub: HubHandle,
}

impl Client {
    /// Create a fresh outbound queue and join `hub` with it.
    ///
    /// Returns once the hub has registered the client, so anything submitted
    /// afterwards is processed after the registration.
    pub async fn connect(hub: &HubHandle) -> Result<Self, HubError> {
        let (handle, queue) = ClientHandle::new(hub.outbound_capacity());
        hub.join(handle).await?;
        tracing::debug!("Client '{}' submitted join", queue.id());

        Ok(Self {
            queue,
            hub: hub.clone(),
        })
    }

    pub fn id(&self) -> ClientId {
        self.queue.id()
    }

    pub fn hub(&self) -> &HubHandle {
        &self.hub
    }

    pub fn queue_mut(&mut self) -> &mut OutboundQueue {
        &mut self.queue
    }

    pub fn into_parts(self) -> (OutboundQueue, HubHandle) {
        (self.queue, self.hub)
    }
}
