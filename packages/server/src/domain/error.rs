//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ClientId validation error
    #[error("ClientId cannot be empty")]
    ClientIdEmpty,

    /// ClientId invalid format error (not a valid UUID format)
    #[error("ClientId must be a valid UUID format (got: {0})")]
    ClientIdInvalidFormat(String),
}

/// Reasons a payload could not be placed on a client's outbound queue
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryError {
    /// The queue is at capacity; the client is not keeping up
    #[error("outbound queue is full")]
    QueueFull,

    /// The receiving side of the queue has gone away
    #[error("outbound queue is closed")]
    QueueClosed,
}
