//! Tracer implementations.

use crate::domain::{TraceEvent, Tracer};

/// Discards every event. The default collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    fn trace(&self, _event: &TraceEvent) {}
}

/// Writes every event to the `tracing` subscriber at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn trace(&self, event: &TraceEvent) {
        tracing::debug!("{}", event);
    }
}
