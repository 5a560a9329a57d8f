//! Server startup: hub, router and listener.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use hubcast_shared::time::get_jst_timestamp;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    domain::Tracer,
    error::ServerError,
    hub::Hub,
    infrastructure::tracer::{LogTracer, NoopTracer},
    ui::{
        handler::{health_check, hub_stats, websocket_handler},
        signal::shutdown_signal,
        state::AppState,
    },
};

/// Build the application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/stats", get(hub_stats))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Validate `config`, bind the listener and serve until a shutdown signal.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    config.validate()?;

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    serve(listener, config, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
///
/// Starts the hub, which keeps running for as long as the server does.
pub async fn serve<F>(
    listener: TcpListener,
    config: ServerConfig,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    config.validate()?;

    let tracer: Arc<dyn Tracer> = if config.trace {
        Arc::new(LogTracer)
    } else {
        Arc::new(NoopTracer)
    };
    let hub = Hub::spawn(config.hub, tracer);

    let state = Arc::new(AppState {
        hub,
        connection: config.connection,
        started_at: get_jst_timestamp(),
    });
    let app = build_router(state);

    tracing::info!("Broadcast hub listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
