//! The broadcast hub.
//!
//! A single task owns the registry of connected clients and is the only code
//! that ever touches it. Everyone else talks to it through the three intakes
//! of a [`HubHandle`]: join, leave and forward. Because all registry changes
//! are applied one at a time by that task, no lock is needed.
//!
//! Fan-out never waits on a client. A client whose outbound queue cannot take
//! a message right now is evicted on the spot, so one stalled connection can
//! only ever hurt itself.

mod client;
mod handle;
mod stats;

pub use client::Client;
use handle::JoinRequest;
pub use handle::{HubError, HubHandle};
pub use stats::HubStats;

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{mpsc, oneshot, watch};

use crate::{
    config::HubConfig,
    domain::{ClientHandle, ClientId, Payload, TraceEvent, Tracer},
};

/// One request taken from an intake.
#[derive(Debug)]
pub(crate) enum HubEvent {
    Join(ClientHandle),
    Leave(ClientId),
    Forward(Payload),
}

/// The hub loop and the registry it owns.
pub struct Hub {
    join_rx: mpsc::Receiver<JoinRequest>,
    leave_rx: mpsc::Receiver<ClientId>,
    forward_rx: mpsc::Receiver<Payload>,
    clients: HashMap<ClientId, ClientHandle>,
    tracer: Arc<dyn Tracer>,
    stats: HubStats,
    stats_tx: watch::Sender<HubStats>,
}

impl Hub {
    /// Create a hub with an empty registry and the handle used to reach it.
    ///
    /// `config` must already be validated; zero capacities panic.
    pub fn new(config: HubConfig, tracer: Arc<dyn Tracer>) -> (Self, HubHandle) {
        let (join_tx, join_rx) = mpsc::channel(config.intake_capacity);
        let (leave_tx, leave_rx) = mpsc::channel(config.intake_capacity);
        let (forward_tx, forward_rx) = mpsc::channel(config.intake_capacity);
        let (stats_tx, stats_rx) = watch::channel(HubStats::default());

        let hub = Self {
            join_rx,
            leave_rx,
            forward_rx,
            clients: HashMap::new(),
            tracer,
            stats: HubStats::default(),
            stats_tx,
        };
        let handle = HubHandle {
            join_tx,
            leave_tx,
            forward_tx,
            stats_rx,
            outbound_capacity: config.outbound_capacity,
        };
        (hub, handle)
    }

    /// Create a hub and run it on a new tokio task.
    pub fn spawn(config: HubConfig, tracer: Arc<dyn Tracer>) -> HubHandle {
        let (hub, handle) = Self::new(config, tracer);
        tokio::spawn(hub.run());
        handle
    }

    /// Process intake events until every [`HubHandle`] has been dropped.
    ///
    /// Exactly one event is applied per iteration. When several intakes are
    /// ready at once the choice between them is random.
    pub async fn run(mut self) {
        tracing::info!("Hub started");

        loop {
            let (event, ack): (HubEvent, Option<oneshot::Sender<()>>) = tokio::select! {
                Some((handle, ack)) = self.join_rx.recv() => (HubEvent::Join(handle), Some(ack)),
                Some(id) = self.leave_rx.recv() => (HubEvent::Leave(id), None),
                Some(payload) = self.forward_rx.recv() => (HubEvent::Forward(payload), None),
                else => break,
            };
            self.apply(event);

            if let Some(ack) = ack {
                // the joiner may have given up waiting; nothing to undo
                let _ = ack.send(());
            }
        }

        tracing::info!("Hub stopped: all handles dropped");
    }

    /// Apply one event to the registry and publish the resulting stats.
    pub(crate) fn apply(&mut self, event: HubEvent) {
        match event {
            HubEvent::Join(handle) => self.join(handle),
            HubEvent::Leave(id) => self.leave(id),
            HubEvent::Forward(payload) => self.forward(payload),
        }

        self.stats.clients = self.clients.len();
        self.stats_tx.send_replace(self.stats);
    }

    fn join(&mut self, handle: ClientHandle) {
        let id = handle.id();
        if self.clients.insert(id, handle).is_some() {
            // the stale handle is dropped here, closing its queue
            tracing::warn!("Client '{}' joined twice; replaced previous entry", id);
        }
        self.stats.joined += 1;
        tracing::info!("Client '{}' joined (clients: {})", id, self.clients.len());
        self.tracer.trace(&TraceEvent::ClientJoined(id));
    }

    fn leave(&mut self, id: ClientId) {
        // Removing drops the handle and with it the only sender of the queue
        if self.clients.remove(&id).is_none() {
            tracing::debug!("Client '{}' already gone; ignoring leave", id);
            return;
        }
        self.stats.left += 1;
        tracing::info!("Client '{}' left (clients: {})", id, self.clients.len());
        self.tracer.trace(&TraceEvent::ClientLeft(id));
    }

    fn forward(&mut self, payload: Payload) {
        self.stats.forwarded += 1;
        self.tracer.trace(&TraceEvent::MessageReceived(payload.clone()));

        let tracer = &self.tracer;
        let stats = &mut self.stats;
        self.clients.retain(|id, handle| match handle.offer(payload.clone()) {
            Ok(()) => {
                stats.delivered += 1;
                tracer.trace(&TraceEvent::Sent(*id));
                true
            }
            Err(err) => {
                stats.evicted += 1;
                tracing::debug!("Evicting client '{}': {}", id, err);
                tracer.trace(&TraceEvent::SendFailed(*id));
                false
            }
        });
    }
}
