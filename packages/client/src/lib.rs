//! Command line client for the hubcast broadcast hub.

pub mod error;
pub mod runner;

pub use error::ClientError;
pub use runner::run_client;
