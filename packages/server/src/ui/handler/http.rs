//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use hubcast_shared::time::timestamp_to_jst_rfc3339;

use crate::{
    infrastructure::dto::{HealthDto, StatsDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// Current hub stats
pub async fn hub_stats(State(state): State<Arc<AppState>>) -> Json<StatsDto> {
    Json(StatsDto::new(
        state.hub.stats(),
        timestamp_to_jst_rfc3339(state.started_at),
    ))
}
