//! Infrastructure layer: concrete collaborators and wire DTOs.

pub mod dto;
pub mod tracer;

pub use tracer::{LogTracer, NoopTracer};
