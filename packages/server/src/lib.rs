//! WebSocket broadcast hub.
//!
//! Clients connect over WebSocket, every message one of them sends is
//! broadcast to all connected clients, and clients that cannot keep up are
//! dropped instead of slowing everyone else down.
//!
//! The [`hub`] module holds the core: a single task that owns the client
//! registry. The [`ui`] module wires it to axum.

pub mod config;
pub mod domain;
pub mod error;
pub mod hub;
pub mod infrastructure;
pub mod ui;

// Re-export entry points
pub use config::{ConnectionConfig, HubConfig, ServerConfig};
pub use error::ServerError;
pub use hub::{Client, Hub, HubError, HubHandle, HubStats};
pub use ui::{build_router, run as run_server, serve};
