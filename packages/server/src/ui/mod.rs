//! WebSocket broadcast server: HTTP surface and per-connection pumps.

mod handler;
pub mod pump;
mod runner;
mod signal;
pub mod state;

pub use runner::{build_router, run, serve};
