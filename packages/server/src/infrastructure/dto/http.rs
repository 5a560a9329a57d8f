//! HTTP response DTOs.

use serde::{Deserialize, Serialize};

use crate::hub::HubStats;

/// Response body of the health check endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}

/// Response body of the stats endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsDto {
    pub clients: usize,
    pub joined: u64,
    pub left: u64,
    pub evicted: u64,
    pub forwarded: u64,
    pub delivered: u64,
    /// Server start time (RFC 3339, JST)
    pub started_at: String,
}

impl StatsDto {
    pub fn new(stats: HubStats, started_at: String) -> Self {
        Self {
            clients: stats.clients,
            joined: stats.joined,
            left: stats.left,
            evicted: stats.evicted,
            forwarded: stats.forwarded,
            delivered: stats.delivered,
            started_at,
        }
    }
}
