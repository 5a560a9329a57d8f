//! Counters published by the hub after every processed event.

use serde::Serialize;

/// Snapshot of the hub's registry size and cumulative counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HubStats {
    /// Clients currently registered
    pub clients: usize,
    /// Join requests processed
    pub joined: u64,
    /// Leave requests that removed a registered client
    pub left: u64,
    /// Clients removed because their outbound queue was full or closed
    pub evicted: u64,
    /// Messages submitted for broadcast
    pub forwarded: u64,
    /// Successful enqueues onto outbound queues
    pub delivered: u64,
}
