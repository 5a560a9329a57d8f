//! Data transfer objects for the HTTP API.

pub mod http;

pub use http::{HealthDto, StatsDto};
