//! Shared application state.

use crate::{config::ConnectionConfig, hub::HubHandle};

/// State shared by every request handler
pub struct AppState {
    /// Handle to the running hub
    pub hub: HubHandle,
    /// Upgrade and pump settings for new connections
    pub connection: ConnectionConfig,
    /// Unix timestamp when the server started (in JST, milliseconds)
    pub started_at: i64,
}
